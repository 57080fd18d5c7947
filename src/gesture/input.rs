//! Decoded wheel input and its normalization into pixel deltas.

use crate::config::GestureConfig;
use crate::gesture::TouchPoint;

/// DOM `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Maps the DOM constant (0, 1, 2). Anything else is read as pixels.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub client_x: f64,
    pub client_y: f64,
}

/// Field access for a platform wheel event.
pub trait WheelSource {
    fn delta_x(&self) -> f64;
    fn delta_y(&self) -> f64;
    fn delta_mode(&self) -> u32;
    fn ctrl_key(&self) -> bool;
    fn shift_key(&self) -> bool;
    fn client_x(&self) -> i32;
    fn client_y(&self) -> i32;
}

/// Field access for one platform touch.
pub trait TouchSource {
    fn identifier(&self) -> i32;
    fn client_x(&self) -> i32;
    fn client_y(&self) -> i32;
}

impl TouchPoint {
    pub fn read(touch: &impl TouchSource) -> Self {
        TouchPoint::new(
            touch.identifier(),
            touch.client_x() as f64,
            touch.client_y() as f64,
        )
    }
}

impl WheelInput {
    pub fn read(event: &impl WheelSource) -> Self {
        WheelInput {
            delta_x: event.delta_x(),
            delta_y: event.delta_y(),
            delta_mode: DeltaMode::from_dom(event.delta_mode()),
            ctrl_key: event.ctrl_key(),
            shift_key: event.shift_key(),
            client_x: event.client_x() as f64,
            client_y: event.client_y() as f64,
        }
    }

    /// Pixel-space `(dx, dy)` for this event.
    ///
    /// Shift turns a purely vertical wheel into a horizontal one, line and
    /// page deltas are scaled to pixels, and the vertical delta is clamped so a
    /// single notch of a coarse mouse wheel cannot jump the view.
    pub fn normalized(&self, config: &GestureConfig) -> (f64, f64) {
        let (mut dx, mut dy) = (self.delta_x, self.delta_y);

        if dx == 0.0 && self.shift_key {
            std::mem::swap(&mut dx, &mut dy);
        }

        let mult = match self.delta_mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => config.line_multiplier,
            DeltaMode::Page => config.page_multiplier,
        };
        dx *= mult;
        dy *= mult;

        let clamped = dy.abs().min(config.max_wheel_delta);
        dy = if dy < 0.0 { -clamped } else { clamped };

        (dx, dy)
    }
}
