// Display helpers for the HUD.
use crate::gesture::Point;

/// Rounds to `precision` decimal places.
pub fn to_fixed(value: f64, precision: u32) -> f64 {
    let multiplier = 10f64.powi(precision as i32);
    (value * multiplier).round() / multiplier
}

pub fn format_point(p: Point) -> String {
    format!("({}, {})", to_fixed(p.x, 1), to_fixed(p.y, 1))
}

pub fn format_degrees(deg: f64) -> String {
    format!("{}°", to_fixed(deg, 1))
}

pub fn format_scale(scale: f64) -> String {
    format!("×{}", to_fixed(scale, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_fixed_rounds_half_away_from_zero() {
        assert_eq!(to_fixed(1.005, 1), 1.0);
        assert_eq!(to_fixed(2.25, 1), 2.3);
        assert_eq!(to_fixed(-2.25, 1), -2.3);
        assert_eq!(to_fixed(12.3456, 0), 12.0);
    }

    #[test]
    fn formats_hud_values() {
        assert_eq!(format_point(Point::new(3.14159, -2.0)), "(3.1, -2)");
        assert_eq!(format_degrees(90.04), "90°");
        assert_eq!(format_scale(1.4812), "×1.48");
    }
}
