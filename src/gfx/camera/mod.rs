pub mod bindings;
pub mod camera_controller;
pub mod camera_utils;

// Re-export main types
pub use bindings::{Action, KeyBindings, Trigger, RESERVED_KEYS};
pub use camera_controller::{CameraInputController, InputState};
pub use camera_utils::{CameraPose, CameraUniform};
