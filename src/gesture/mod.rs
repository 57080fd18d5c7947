//! Two-finger gesture recognition for wheel, trackpad pinch and touch input.
//!
//! The recognizer here is platform-neutral: it takes decoded input values and
//! emits [`Gesture`]s through yew callbacks. [`crate::surface`] feeds it from
//! real DOM events.

pub mod input;
pub mod math;
pub mod recognizer;
pub mod types;

pub use input::{DeltaMode, TouchSource, WheelInput, WheelSource};
pub use recognizer::{DebounceTicket, GestureHandlers, GestureRecognizer};
pub use types::{Gesture, Point, SessionOwner, TouchPoint};
