// src/lib.rs
//! Orrery
//!
//! Interactive scaled solar-system core: bodies on fixed elliptical orbits,
//! pause/resume with per-body speed memory, and a free-look camera driven by
//! keyboard and mouse. Rendering is left to a [`simulation::FrameSink`].

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod simulation;
pub mod ui;

// Re-export main types for convenience
pub use app::OrreryApp;
pub use error::{OrreryError, Result};

/// Creates an application with the default eight-planet system
pub fn default(sink: Box<dyn simulation::FrameSink>) -> Result<OrreryApp> {
    OrreryApp::new(&config::SystemConfig::default(), sink)
}
