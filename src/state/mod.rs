pub mod camera;

pub use camera::ViewTransform;
