//! Per-body speed overrides coming from live UI controls

use std::collections::HashMap;

use super::{
    pause::PauseState,
    registry::{BodyId, BodyRegistry},
};

/// Coerces raw control text to a speed. Anything that is not a finite number
/// (empty, "abc", "NaN", "inf") becomes 0.
pub fn parse_speed(raw: &str) -> f32 {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Handle for one body's speed control, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedControl {
    body: BodyId,
}

impl SpeedControl {
    pub fn body(&self) -> BodyId {
        self.body
    }
}

/// Routes speed edits to bodies without name lookups on the hot path.
#[derive(Debug, Clone, Default)]
pub struct SpeedRegistry {
    controls: HashMap<String, SpeedControl>,
}

impl SpeedRegistry {
    /// Registers one control per body in `bodies`.
    pub fn new(bodies: &BodyRegistry) -> Self {
        let controls = bodies
            .iter()
            .map(|(id, entry)| (entry.name().to_string(), SpeedControl { body: id }))
            .collect();
        Self { controls }
    }

    /// Looks up the control for a body name. Call during wiring, keep the handle.
    pub fn control(&self, name: &str) -> Option<SpeedControl> {
        self.controls.get(name).copied()
    }

    /// Applies a user speed to one body.
    ///
    /// While paused the body stays frozen and the value becomes the one
    /// restored on resume. A non-finite value is stored as 0. Returns false
    /// if the id is unknown.
    pub fn set_body_speed(
        &self,
        bodies: &mut BodyRegistry,
        state: PauseState,
        id: BodyId,
        value: f32,
    ) -> bool {
        let Some(entry) = bodies.get_mut(id) else {
            log::warn!("Speed change for unknown body {:?} ignored", id);
            return false;
        };

        entry.body.set_speed(value);
        if state.is_paused() {
            entry.body.pause();
        }
        log::debug!("Speed of {} set to {}", entry.config.name, entry.body.saved_speed());
        true
    }

    /// Same as [`SpeedRegistry::set_body_speed`] for raw control text.
    pub fn set_body_speed_raw(
        &self,
        bodies: &mut BodyRegistry,
        state: PauseState,
        id: BodyId,
        raw: &str,
    ) -> bool {
        self.set_body_speed(bodies, state, id, parse_speed(raw))
    }
}
