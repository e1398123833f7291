//! # Orrery Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use orrery::prelude::*;
//!
//! struct NullSink;
//!
//! impl FrameSink for NullSink {
//!     fn set_body_transform(&mut self, _id: BodyId, _transform: &BodyTransform) {}
//!     fn set_camera_pose(&mut self, _pose: &CameraPose) {}
//! }
//!
//! fn main() -> orrery::Result<()> {
//!     let app = OrreryApp::new(&SystemConfig::default(), Box::new(NullSink))?;
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::OrreryApp;
pub use crate::config::{BodyConfig, CameraConfig, ClockConfig, SystemConfig};
pub use crate::error::{OrreryError, Result};

// Re-export camera types
pub use crate::gfx::camera::{
    Action, CameraInputController, CameraPose, CameraUniform, KeyBindings, Trigger,
};

// Re-export simulation framework
pub use crate::simulation::{
    BodyId, BodyTransform, EllipticalPath, FrameDriver, FrameSink, OrbitingBody, PauseState,
    SpeedControl,
};
pub use crate::ui::UiEvent;

// Re-export common external dependencies
pub use cgmath::{Vector2, Vector3};
