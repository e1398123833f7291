//! Interface to the rendering collaborator
//!
//! The simulation never draws anything. Once per frame it hands each body's
//! transform and the camera pose to a [`FrameSink`], which owns meshes,
//! materials and the GPU.

use cgmath::{Vector2, Vector3};

use super::registry::BodyId;
use crate::gfx::camera::CameraPose;

/// Where a body is this frame and how far it has spun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    /// Orbit plane position; z is always 0.
    pub position: Vector3<f32>,
    /// Spin about the body's own axis, radians in `[0, 2pi)`.
    pub self_rotation: f32,
    /// Static tilt of the spin axis, radians.
    pub axial_tilt: f32,
}

/// Consumer of per-frame simulation output.
///
/// The driver calls every `set_body_transform` for a frame, then
/// `set_camera_pose`, then `end_frame`. Nothing is emitted mid-update.
/// Orbit outlines are static and sent once by
/// [`FrameDriver::emit_orbit_outlines`](super::FrameDriver::emit_orbit_outlines).
pub trait FrameSink {
    /// Receive the transform of one body
    fn set_body_transform(&mut self, id: BodyId, transform: &BodyTransform);

    /// Optional: receive a body's closed orbit line once, before the first frame
    fn set_orbit_outline(&mut self, _id: BodyId, _points: &[Vector2<f32>]) {}

    /// Receive the camera pose after held input has been applied
    fn set_camera_pose(&mut self, pose: &CameraPose);

    /// Optional: called once all values for the frame are delivered
    fn end_frame(&mut self) {
        // Default: nothing to flush
    }
}
