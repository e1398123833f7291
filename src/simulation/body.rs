//! Per-body orbital state

use std::f32::consts::TAU;

use super::path::EllipticalPath;

/// A single body's simulation state.
///
/// `current_speed` is the active rate of phase advance. `saved_speed` is the
/// pause snapshot: the value [`OrbitingBody::resume`] restores.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    path: EllipticalPath,
    phase: f32,
    current_speed: f32,
    saved_speed: f32,
    self_rotation: f32,
    /// Radians of spin per unit of phase (spins per orbit * 2pi).
    rotation_rate: f32,
}

impl OrbitingBody {
    pub fn new(path: EllipticalPath, speed: f32, spins_per_orbit: f32) -> Self {
        let speed = finite_or_zero(speed);
        Self {
            path,
            phase: 0.0,
            current_speed: speed,
            saved_speed: speed,
            self_rotation: 0.0,
            rotation_rate: finite_or_zero(spins_per_orbit * TAU),
        }
    }

    /// Moves the body `delta` time units along its orbit.
    ///
    /// Spin advances with the phase increment, so a stopped orbit also stops
    /// the spin and scaling the orbital speed scales the spin with it.
    pub fn advance(&mut self, delta: f32) {
        // Widened so a huge speed cannot overflow the spin increment
        let step = f64::from(delta) * f64::from(self.current_speed);
        if step == 0.0 || !step.is_finite() {
            return;
        }

        self.phase = wrap(f64::from(self.phase) + step.rem_euclid(1.0), 1.0);
        let spin = (f64::from(self.rotation_rate) * step).rem_euclid(TAU_F64);
        self.self_rotation = wrap(f64::from(self.self_rotation) + spin, TAU_F64);
    }

    /// User speed edit: updates both the active speed and the pause snapshot.
    ///
    /// A non-finite speed is stored as 0.
    pub fn set_speed(&mut self, speed: f32) {
        let speed = finite_or_zero(speed);
        self.current_speed = speed;
        self.saved_speed = speed;
    }

    pub fn pause(&mut self) {
        self.saved_speed = self.current_speed;
        self.current_speed = 0.0;
    }

    pub fn resume(&mut self) {
        self.current_speed = self.saved_speed;
    }

    pub fn path(&self) -> &EllipticalPath {
        &self.path
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn saved_speed(&self) -> f32 {
        self.saved_speed
    }

    /// Accumulated spin in radians, in `[0, 2pi)`.
    pub fn self_rotation(&self) -> f32 {
        self.self_rotation
    }

    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Current position on the orbit plane.
    pub fn position(&self) -> cgmath::Vector2<f32> {
        self.path.point_at(self.phase)
    }
}

const TAU_F64: f64 = std::f64::consts::TAU;

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Reduces `value` into `[0, period)` and narrows it back to f32.
fn wrap(value: f64, period: f64) -> f32 {
    let wrapped = value.rem_euclid(period) as f32;
    // Narrowing can round up to exactly the period
    if wrapped >= period as f32 {
        0.0
    } else {
        wrapped
    }
}
