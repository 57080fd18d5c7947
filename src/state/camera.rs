// Canvas view transform driven by gestures and the camera buttons.
use serde::{Deserialize, Serialize};

use crate::gesture::Point;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;

/// Pan/zoom applied to the canvas: `p -> origin + scale * (p + translation - origin)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translation: Point,
    pub scale: f64,
    pub origin: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translation: Point::ZERO,
            scale: 1.0,
            origin: Point::ZERO,
        }
    }
}

impl ViewTransform {
    /// `[a, b, c, d, e, f]` for `CanvasRenderingContext2d::set_transform`.
    ///
    /// Same as translate(origin), scale(s), translate(translation),
    /// translate(-origin) applied in that order.
    pub fn matrix(&self) -> [f64; 6] {
        let s = self.scale;
        let e = self.origin.x + s * (self.translation.x - self.origin.x);
        let f = self.origin.y + s * (self.translation.y - self.origin.y);
        [s, 0.0, 0.0, s, e, f]
    }

    pub fn apply(&self, p: Point) -> Point {
        let [a, _, _, d, e, f] = self.matrix();
        Point::new(a * p.x + e, d * p.y + f)
    }

    /// Zooms keeping the screen point `at` fixed.
    pub fn zoom_at(&mut self, factor: f64, at: Point) {
        let world = self.unapply(at);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        // solve apply(world) == at for translation
        let s = self.scale;
        self.translation.x = (at.x - self.origin.x) / s + self.origin.x - world.x;
        self.translation.y = (at.y - self.origin.y) / s + self.origin.y - world.y;
    }

    /// Moves the content by `(dx, dy)` screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translation.x += dx / self.scale;
        self.translation.y += dy / self.scale;
    }

    pub fn unapply(&self, p: Point) -> Point {
        let [a, _, _, d, e, f] = self.matrix();
        Point::new((p.x - e) / a, (p.y - f) / d)
    }
}
