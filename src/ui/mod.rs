//! # User Interface Events
//!
//! The on-screen controls (one speed slider per body, a pause/play button)
//! belong to the host. This module defines what those controls report back
//! to the simulation.
//!
//! Speed controls are resolved from body names once at startup through
//! [`FrameDriver::speed_control`], so events carry a typed handle rather than
//! a name.
//!
//! ```no_run
//! use orrery::{config::SystemConfig, simulation::FrameDriver, ui::UiEvent};
//!
//! let mut driver = FrameDriver::new(&SystemConfig::default()).unwrap();
//! let earth = driver.speed_control("earth").unwrap();
//!
//! // Slider moved: the raw text is forwarded untouched
//! driver.handle_ui_event(UiEvent::SpeedChanged { control: earth, raw: "1.5".into() });
//! driver.handle_ui_event(UiEvent::PauseToggleClicked);
//!
//! // The button shows the action its next click would take
//! println!("{}", driver.pause_state().button_label());
//! ```
//!
//! [`FrameDriver::speed_control`]: crate::simulation::FrameDriver::speed_control

use crate::simulation::SpeedControl;

/// Something the user did with an on-screen control.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A speed control changed. `raw` is the control's text value; anything
    /// that is not a number is treated as 0.
    SpeedChanged { control: SpeedControl, raw: String },

    /// The pause/play button was clicked.
    PauseToggleClicked,
}
