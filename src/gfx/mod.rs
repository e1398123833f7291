//! # Graphics Module
//!
//! Camera state and input handling. Meshes, materials and the draw loop live
//! in the rendering collaborator behind [`crate::simulation::FrameSink`].
//!
//! ## Camera System
//!
//! - [`camera::CameraInputController`] - turns key, pointer and wheel events into pose changes
//! - [`camera::CameraPose`] - position, rotation and zoom read by the renderer each frame
//! - [`camera::KeyBindings`] - configurable `{action: trigger}` pairs
//! - [`camera::CameraUniform`] - GPU-ready view-projection for a pose

pub mod camera;

// Re-export commonly used types
pub use camera::{CameraInputController, CameraPose};
