// src/simulation/mod.rs
//! Simulation system
//!
//! Orbital state, timing, pause handling and the per-frame driver. Bodies
//! follow fixed ellipses; there is no gravity integration.

pub mod body;
pub mod clock;
pub mod frame_driver;
pub mod path;
pub mod pause;
pub mod registry;
pub mod speed;
pub mod traits;

// Re-export main types
pub use body::OrbitingBody;
pub use clock::SimulationClock;
pub use frame_driver::FrameDriver;
pub use path::EllipticalPath;
pub use pause::{PauseController, PauseState};
pub use registry::{BodyEntry, BodyId, BodyRegistry};
pub use speed::{parse_speed, SpeedControl, SpeedRegistry};
pub use traits::{BodyTransform, FrameSink};
