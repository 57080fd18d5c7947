//! Two-finger gesture recognition for a browser canvas, plus the pan/zoom
//! view model and yew-facing glue that the `d20-tray` app is built from.

pub mod config;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod model;
pub mod state;
pub mod surface;
pub mod util;

pub use config::GestureConfig;
pub use error::ConfigError;
pub use gesture::{Gesture, GestureHandlers, GestureRecognizer, Point, SessionOwner};
pub use surface::GestureSurface;
