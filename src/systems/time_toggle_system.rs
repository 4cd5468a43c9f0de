use bevy::prelude::*;

use crate::events::{SetTimeStateEvent, TimeToggleEvent};
use crate::resources::{DayNightSettings, TimeController};

/// System that turns the configured toggle key into a [`TimeToggleEvent`].
///
/// Only the press edge counts; holding the key does not repeat the toggle.
pub fn time_toggle_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<DayNightSettings>,
    controller: Res<TimeController>,
    mut toggle_events: MessageWriter<TimeToggleEvent>,
) {
    if keyboard.just_pressed(settings.toggle_key) {
        debug!(
            "Toggle key {:?} pressed, transitioning: {}",
            settings.toggle_key,
            controller.is_transitioning()
        );
        toggle_events.write(TimeToggleEvent);
    }
}

/// System that applies pending requests to the [`TimeController`] and then
/// advances its transition by this frame's delta.
///
/// Forced state changes are applied before toggles, so a toggle sent in the
/// same frame starts from the forced state.
pub fn time_controller_system(
    mut controller: ResMut<TimeController>,
    mut set_state_events: MessageReader<SetTimeStateEvent>,
    mut toggle_events: MessageReader<TimeToggleEvent>,
    time: Res<Time>,
) {
    for event in set_state_events.read() {
        controller.set_state(event.state);
    }

    for _ in toggle_events.read() {
        controller.toggle();
    }

    controller.tick(time.delta_secs());
}
