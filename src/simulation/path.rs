//! Fixed parametric ellipse that a body travels along

use cgmath::Vector2;
use std::f32::consts::TAU;

use crate::error::{OrreryError, Result};

/// Number of segments used when sampling an orbit line for display.
pub const DEFAULT_OUTLINE_SEGMENTS: usize = 200;

/// Axis-aligned ellipse centred on the light source.
///
/// Phase `p` maps to angle `p * 2pi`, so one unit of phase is one revolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalPath {
    semi_major: f32,
    semi_minor: f32,
}

impl EllipticalPath {
    /// Builds a path, rejecting radii that are not finite and strictly positive.
    pub fn new(semi_major: f32, semi_minor: f32) -> Result<Self> {
        Self::named("<unnamed>", semi_major, semi_minor)
    }

    /// Same as [`EllipticalPath::new`] but names the body in the error.
    pub fn named(body: &str, semi_major: f32, semi_minor: f32) -> Result<Self> {
        let valid = |r: f32| r.is_finite() && r > 0.0;
        if !valid(semi_major) || !valid(semi_minor) {
            return Err(OrreryError::InvalidRadius {
                body: body.to_string(),
                semi_major,
                semi_minor,
            });
        }

        Ok(Self {
            semi_major,
            semi_minor,
        })
    }

    pub fn semi_major(&self) -> f32 {
        self.semi_major
    }

    pub fn semi_minor(&self) -> f32 {
        self.semi_minor
    }

    /// Position on the curve for a phase. Any real phase is accepted.
    pub fn point_at(&self, phase: f32) -> Vector2<f32> {
        let theta = phase * TAU;
        Vector2::new(self.semi_major * theta.cos(), self.semi_minor * theta.sin())
    }

    /// Samples `segments + 1` points around the curve; the last repeats the first.
    pub fn outline(&self, segments: usize) -> Vec<Vector2<f32>> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                if i == segments {
                    // Close exactly rather than trusting cos/sin at 2pi
                    self.point_at(0.0)
                } else {
                    self.point_at(i as f32 / segments as f32)
                }
            })
            .collect()
    }
}
