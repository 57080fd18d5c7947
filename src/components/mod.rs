pub mod app;
pub mod camera_controls;
pub mod gesture_panel;
pub mod settings_modal;
pub mod tray_view;
