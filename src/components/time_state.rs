use bevy::prelude::*;
use serde::Deserialize;

/// The two world states the time controller switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeState {
    #[default]
    Day,
    Night,
}

impl TimeState {
    pub fn toggled(self) -> Self {
        match self {
            TimeState::Day => TimeState::Night,
            TimeState::Night => TimeState::Day,
        }
    }

    /// Boundary progress value for this state: 0.0 = full day, 1.0 = full night.
    pub fn night_weight(self) -> f32 {
        match self {
            TimeState::Day => 0.0,
            TimeState::Night => 1.0,
        }
    }
}
