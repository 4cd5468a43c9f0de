//! Configuration resources for the day/night controller.
//!
//! [`TransitionConfig`] holds the per-direction transition durations and
//! [`DayNightSettings`] bundles everything the plugin needs at startup:
//! - Starting state
//! - Toggle key
//! - Transition durations

use bevy::prelude::*;

use crate::{components::TimeState, error::DayNightError, TimeConfig};

/// Transition durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TransitionConfig {
    /// Seconds to blend from day into night. Zero or less swaps instantly.
    pub to_night: f32,

    /// Seconds to blend from night back into day.
    ///
    /// `None` (or a negative value) inherits [`TransitionConfig::to_night`].
    pub to_day: Option<f32>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::instant()
    }
}

impl TransitionConfig {
    pub fn instant() -> Self {
        Self {
            to_night: 0.0,
            to_day: None,
        }
    }

    /// Same duration in both directions.
    pub fn symmetric(seconds: f32) -> Self {
        Self {
            to_night: seconds,
            to_day: None,
        }
    }

    /// Different durations for dusk and dawn, e.g. a fast dusk and slow dawn.
    pub fn asymmetric(to_night: f32, to_day: f32) -> Self {
        Self {
            to_night,
            to_day: Some(to_day),
        }
    }

    /// Duration of a transition leaving `from`.
    pub fn duration_from(&self, from: TimeState) -> f32 {
        match from {
            TimeState::Day => self.to_night,
            TimeState::Night => match self.to_day {
                Some(seconds) if seconds >= 0.0 => seconds,
                _ => self.to_night,
            },
        }
    }

    /// Rejects NaN and infinite durations.
    pub fn validate(&self) -> Result<(), DayNightError> {
        for seconds in std::iter::once(self.to_night).chain(self.to_day) {
            if !seconds.is_finite() {
                return Err(DayNightError::NonFiniteDuration(seconds));
            }
        }
        Ok(())
    }
}

/// Startup settings for [`DayNightPlugin`](crate::DayNightPlugin).
#[derive(Resource, Clone, Debug)]
pub struct DayNightSettings {
    pub starting_state: TimeState,

    /// Key whose press edge toggles between day and night.
    pub toggle_key: KeyCode,

    pub transition: TransitionConfig,
}

impl Default for DayNightSettings {
    fn default() -> Self {
        Self {
            starting_state: TimeState::Day,
            toggle_key: KeyCode::Tab,
            transition: TransitionConfig::default(),
        }
    }
}

impl DayNightSettings {
    pub fn from_config(config: &TimeConfig) -> Result<Self, DayNightError> {
        let toggle_key = parse_key_code(&config.toggle_key)
            .ok_or_else(|| DayNightError::UnknownToggleKey(config.toggle_key.clone()))?;
        let transition = config.transition();
        transition.validate()?;

        Ok(Self {
            starting_state: config.starting_state,
            toggle_key,
            transition,
        })
    }
}

/// Parses a key name as written in the config file.
///
/// Accepts the `KeyCode` variant name (`"KeyN"`, `"Digit1"`, `"F5"`) as well as
/// the bare letter or digit (`"N"`, `"1"`). Matching is case-insensitive.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();
    let key = match name.as_str() {
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Space,
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "backspace" => KeyCode::Backspace,
        "f1" => KeyCode::F1,
        "f2" => KeyCode::F2,
        "f3" => KeyCode::F3,
        "f4" => KeyCode::F4,
        "f5" => KeyCode::F5,
        "f6" => KeyCode::F6,
        "f7" => KeyCode::F7,
        "f8" => KeyCode::F8,
        "f9" => KeyCode::F9,
        "f10" => KeyCode::F10,
        "f11" => KeyCode::F11,
        "f12" => KeyCode::F12,
        _ => {
            let short = name
                .strip_prefix("key")
                .or_else(|| name.strip_prefix("digit"))
                .unwrap_or(&name);
            let mut chars = short.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            return key_code_for_char(c);
        }
    };
    Some(key)
}

fn key_code_for_char(c: char) -> Option<KeyCode> {
    let key = match c {
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
        _ => return None,
    };
    Some(key)
}
