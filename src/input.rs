//! Named input actions
//!
//! The raw device is outside the crate: whatever drives the game maps keys to
//! [`Action`]s and delivers press/release events. Screens turn those into
//! held intents or one-shot commands.

use serde::{Deserialize, Serialize};

/// Input actions understood by the screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Accelerate,
    TurnLeft,
    TurnRight,
    Fire,
    Pause,
    Confirm,
    NavigateUp,
    NavigateDown,
    Backspace,
    ToggleDebug,
    Quit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Accelerate => "accelerate",
            Action::TurnLeft => "turnLeft",
            Action::TurnRight => "turnRight",
            Action::Fire => "fire",
            Action::Pause => "pause",
            Action::Confirm => "confirm",
            Action::NavigateUp => "navigateUp",
            Action::NavigateDown => "navigateDown",
            Action::Backspace => "backspace",
            Action::ToggleDebug => "toggleDebug",
            Action::Quit => "quit",
        }
    }

    /// Look up an action by name (case-insensitive); unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "accelerate" => Some(Action::Accelerate),
            "turnleft" => Some(Action::TurnLeft),
            "turnright" => Some(Action::TurnRight),
            "fire" => Some(Action::Fire),
            "pause" => Some(Action::Pause),
            "confirm" => Some(Action::Confirm),
            "navigateup" => Some(Action::NavigateUp),
            "navigatedown" => Some(Action::NavigateDown),
            "backspace" => Some(Action::Backspace),
            "toggledebug" => Some(Action::ToggleDebug),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Action),
    Release(Action),
    /// Single character typed (name entry)
    Char(char),
}

impl InputEvent {
    /// Parse `"press <action>"`, `"release <action>"` or `"char <c>"`.
    ///
    /// Malformed lines and unrecognized action names are ignored (`None`).
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next()?;
        let arg = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        match verb.to_ascii_lowercase().as_str() {
            "press" => Action::from_name(arg).map(InputEvent::Press),
            "release" => Action::from_name(arg).map(InputEvent::Release),
            "char" => {
                let mut chars = arg.chars();
                let c = chars.next()?;
                chars.next().is_none().then_some(InputEvent::Char(c))
            }
            _ => None,
        }
    }
}
