//! Error types for the orrery core
//!
//! Only construction and configuration can fail. Runtime inputs (speed edits,
//! key codes, wheel deltas, frame timing) are normalised instead of rejected.

use thiserror::Error;

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Errors raised while building or configuring the simulation
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("invalid orbit for '{body}': radii must be finite and positive (semi-major {semi_major}, semi-minor {semi_minor})")]
    InvalidRadius {
        body: String,
        semi_major: f32,
        semi_minor: f32,
    },

    #[error("duplicate body name: {0}")]
    DuplicateBody(String),

    #[error("system configuration has no bodies")]
    EmptySystem,

    #[error("max frame delta must be finite and positive, got {0}")]
    InvalidClockCap(f32),

    #[error("zoom floor must be finite and positive, got {0}")]
    InvalidZoomFloor(f32),

    #[error("unknown key or button binding: {0}")]
    UnknownTrigger(String),

    #[error("'{0}' is reserved by the window and cannot be bound to a camera action")]
    ReservedKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
