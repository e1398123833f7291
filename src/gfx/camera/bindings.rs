//! Configurable key and mouse-button bindings for camera actions

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::error::OrreryError;

/// Keys the host window handles itself: Space toggles pause, Escape quits.
pub const RESERVED_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::Escape];

/// Camera actions that fire every frame while their trigger is held,
/// except [`Action::ResetCamera`] which fires once on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StrafeLeft,
    StrafeRight,
    StrafeUp,
    StrafeDown,
    ZoomIn,
    ZoomOut,
    ResetCamera,
}

impl Action {
    /// Looks up an action by its snake_case config name.
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "strafe_left" => Action::StrafeLeft,
            "strafe_right" => Action::StrafeRight,
            "strafe_up" => Action::StrafeUp,
            "strafe_down" => Action::StrafeDown,
            "zoom_in" => Action::ZoomIn,
            "zoom_out" => Action::ZoomOut,
            "reset_camera" => Action::ResetCamera,
            _ => return None,
        };
        Some(action)
    }
}

/// A physical input that can drive an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl FromStr for Trigger {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Some(button) = name.strip_prefix("mouse:") {
            let button = match button {
                "left" | "primary" => MouseButton::Left,
                "right" | "secondary" => MouseButton::Right,
                "middle" => MouseButton::Middle,
                _ => return Err(OrreryError::UnknownTrigger(s.to_string())),
            };
            return Ok(Trigger::Mouse(button));
        }

        parse_key(&name)
            .map(Trigger::Key)
            .ok_or_else(|| OrreryError::UnknownTrigger(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Trigger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Key(code) => write!(f, "{:?}", code),
            Trigger::Mouse(button) => write!(f, "mouse:{:?}", button),
        }
    }
}

/// Maps a key identifier to a key code, ignoring case.
///
/// Accepts single letters and digits plus a handful of named keys
/// ("space", "shift", "arrowup", ...). Returns `None` for anything else.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return key_for_char(c);
    }

    let code = match name.as_str() {
        "space" => KeyCode::Space,
        "shift" | "shiftleft" => KeyCode::ShiftLeft,
        "shiftright" => KeyCode::ShiftRight,
        "control" | "ctrl" | "controlleft" => KeyCode::ControlLeft,
        "arrowup" | "up" => KeyCode::ArrowUp,
        "arrowdown" | "down" => KeyCode::ArrowDown,
        "arrowleft" | "left" => KeyCode::ArrowLeft,
        "arrowright" | "right" => KeyCode::ArrowRight,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "escape" | "esc" => KeyCode::Escape,
        "enter" | "return" => KeyCode::Enter,
        "minus" => KeyCode::Minus,
        "equal" | "plus" => KeyCode::Equal,
        _ => return None,
    };
    Some(code)
}

fn key_for_char(c: char) -> Option<KeyCode> {
    let code = match c {
        'a' => KeyCode::KeyA,
        'b' => KeyCode::KeyB,
        'c' => KeyCode::KeyC,
        'd' => KeyCode::KeyD,
        'e' => KeyCode::KeyE,
        'f' => KeyCode::KeyF,
        'g' => KeyCode::KeyG,
        'h' => KeyCode::KeyH,
        'i' => KeyCode::KeyI,
        'j' => KeyCode::KeyJ,
        'k' => KeyCode::KeyK,
        'l' => KeyCode::KeyL,
        'm' => KeyCode::KeyM,
        'n' => KeyCode::KeyN,
        'o' => KeyCode::KeyO,
        'p' => KeyCode::KeyP,
        'q' => KeyCode::KeyQ,
        'r' => KeyCode::KeyR,
        's' => KeyCode::KeyS,
        't' => KeyCode::KeyT,
        'u' => KeyCode::KeyU,
        'v' => KeyCode::KeyV,
        'w' => KeyCode::KeyW,
        'x' => KeyCode::KeyX,
        'y' => KeyCode::KeyY,
        'z' => KeyCode::KeyZ,
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        ' ' => KeyCode::Space,
        '-' => KeyCode::Minus,
        '=' | '+' => KeyCode::Equal,
        _ => return None,
    };
    Some(code)
}

/// Ordered `(action, trigger)` pairs. One action may have several triggers.
///
/// In TOML this is a table of action name to one or more trigger strings:
///
/// ```toml
/// [bindings]
/// strafe_left = "a"
/// zoom_in = ["w", "mouse:left"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pairs: Vec<(Action, Trigger)>,
}

impl KeyBindings {
    pub fn new(pairs: Vec<(Action, Trigger)>) -> Self {
        Self { pairs }
    }

    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// A/D strafe X, Q/E strafe Y, W/S zoom, R reset.
    pub fn canonical() -> Self {
        Self::new(vec![
            (Action::StrafeLeft, Trigger::Key(KeyCode::KeyA)),
            (Action::StrafeRight, Trigger::Key(KeyCode::KeyD)),
            (Action::StrafeUp, Trigger::Key(KeyCode::KeyQ)),
            (Action::StrafeDown, Trigger::Key(KeyCode::KeyE)),
            (Action::ZoomIn, Trigger::Key(KeyCode::KeyW)),
            (Action::ZoomOut, Trigger::Key(KeyCode::KeyS)),
            (Action::ResetCamera, Trigger::Key(KeyCode::KeyR)),
        ])
    }

    /// WASD strafing with no keyboard zoom.
    pub fn strafe_only() -> Self {
        Self::new(vec![
            (Action::StrafeLeft, Trigger::Key(KeyCode::KeyA)),
            (Action::StrafeRight, Trigger::Key(KeyCode::KeyD)),
            (Action::StrafeUp, Trigger::Key(KeyCode::KeyW)),
            (Action::StrafeDown, Trigger::Key(KeyCode::KeyS)),
        ])
    }

    /// Canonical keys, with left/right mouse buttons also zooming in/out.
    ///
    /// Zoom buttons don't drag, so this preset leaves no mouse rotation.
    pub fn with_mouse_zoom() -> Self {
        let mut bindings = Self::canonical();
        bindings.bind(Action::ZoomIn, Trigger::Mouse(MouseButton::Left));
        bindings.bind(Action::ZoomOut, Trigger::Mouse(MouseButton::Right));
        bindings
    }

    pub fn bind(&mut self, action: Action, trigger: Trigger) {
        if !self.pairs.contains(&(action, trigger)) {
            self.pairs.push((action, trigger));
        }
    }

    pub fn pairs(&self) -> &[(Action, Trigger)] {
        &self.pairs
    }

    /// Actions bound to `trigger`, in binding order.
    pub fn actions_for(&self, trigger: Trigger) -> impl Iterator<Item = Action> + '_ {
        self.pairs
            .iter()
            .filter(move |(_, t)| *t == trigger)
            .map(|(a, _)| *a)
    }

    pub fn triggers_for(&self, action: Action) -> impl Iterator<Item = Trigger> + '_ {
        self.pairs
            .iter()
            .filter(move |(a, _)| *a == action)
            .map(|(_, t)| *t)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::canonical()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Trigger),
    Many(Vec<Trigger>),
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        let mut bindings = KeyBindings::empty();

        for (name, triggers) in table {
            let action = Action::from_name(&name).ok_or_else(|| {
                <D::Error as serde::de::Error>::custom(format!("unknown camera action: {}", name))
            })?;
            let triggers = match triggers {
                OneOrMany::One(trigger) => vec![trigger],
                OneOrMany::Many(triggers) => triggers,
            };
            for trigger in triggers {
                bindings.bind(action, trigger);
            }
        }

        Ok(bindings)
    }
}
