use serde::{Deserialize, Serialize};

/// A coordinate in client (CSS pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Accumulated two-finger transform since the start of a session.
///
/// `scale` is multiplicative (1.0 = unchanged), `rotation` is in degrees and
/// never wrapped, `origin` is the pivot recorded when the session started.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub origin: Point,
    pub translation: Point,
    pub scale: f64,
    pub rotation: f64,
}

impl Gesture {
    /// The value emitted on session start: no translation, scale or rotation.
    pub fn identity(origin: Point) -> Self {
        Self {
            origin,
            translation: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// One contact from a touch event's `touches` list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Which input family owns the active session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOwner {
    Touch,
    Wheel,
}

impl SessionOwner {
    pub fn label(self) -> &'static str {
        match self {
            SessionOwner::Touch => "touch",
            SessionOwner::Wheel => "wheel",
        }
    }
}
