//! Global pause/resume over every body

use std::fmt;

use super::registry::BodyRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Running,
    Paused,
}

impl PauseState {
    pub fn is_paused(self) -> bool {
        self == PauseState::Paused
    }

    /// Text for the toggle button: the action a click would take.
    pub fn button_label(self) -> &'static str {
        match self {
            PauseState::Running => "Pause",
            PauseState::Paused => "Play",
        }
    }
}

impl fmt::Display for PauseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseState::Running => write!(f, "Running"),
            PauseState::Paused => write!(f, "Paused"),
        }
    }
}

/// Two-state machine that freezes or restores all bodies in one step.
#[derive(Debug, Clone, Default)]
pub struct PauseController {
    state: PauseState,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Flips between running and paused, applying the change to every body.
    pub fn toggle(&mut self, bodies: &mut BodyRegistry) -> PauseState {
        self.state = match self.state {
            PauseState::Running => {
                bodies.bodies_mut().for_each(|body| body.pause());
                PauseState::Paused
            }
            PauseState::Paused => {
                bodies.bodies_mut().for_each(|body| body.resume());
                PauseState::Running
            }
        };

        log::info!("Simulation {}", self.state);
        self.state
    }

    /// Moves to `paused` if not already there.
    pub fn set_paused(&mut self, paused: bool, bodies: &mut BodyRegistry) -> PauseState {
        if self.is_paused() != paused {
            self.toggle(bodies);
        }
        self.state
    }
}
