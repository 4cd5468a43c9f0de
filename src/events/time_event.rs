use bevy::prelude::*;

use crate::components::TimeState;

/// Message sent when the day/night toggle input fires this frame
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct TimeToggleEvent;

/// Message requesting an immediate switch to `state`, cancelling any transition
#[derive(Message, Clone, Copy, Debug)]
pub struct SetTimeStateEvent {
    pub state: TimeState,
}

impl SetTimeStateEvent {
    pub fn new(state: TimeState) -> Self {
        Self { state }
    }
}
