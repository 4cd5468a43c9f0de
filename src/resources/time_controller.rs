//! Day/night state machine.
//!
//! [`TimeController`] owns the authoritative [`TimeState`] and an optional
//! in-flight transition. Listeners subscribe to two notification channels:
//! - `state_changed`: fired once when a transition completes or an instant swap happens
//! - `transition_progress`: fired every tick of a transition, plus a boundary snap
//!   (exactly 0.0 or 1.0) immediately before every `state_changed`
//!
//! Progress is always expressed as distance toward night, regardless of the
//! transition direction.

use bevy::prelude::*;

use crate::{components::TimeState, error::DayNightError};

use super::{ObserverList, SubscriptionId, TransitionConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTransition {
    elapsed: f32,
    /// Captured when the transition starts.
    duration: f32,
    target: TimeState,
}

#[derive(Resource)]
pub struct TimeController {
    current_state: TimeState,
    config: TransitionConfig,
    transition: Option<ActiveTransition>,
    next_subscription: u64,
    state_changed: ObserverList<TimeState>,
    transition_progress: ObserverList<f32>,
}

impl TimeController {
    pub fn new(starting_state: TimeState, config: TransitionConfig) -> Self {
        Self {
            current_state: starting_state,
            config,
            transition: None,
            next_subscription: 0,
            state_changed: ObserverList::default(),
            transition_progress: ObserverList::default(),
        }
    }

    pub fn current_state(&self) -> TimeState {
        self.current_state
    }

    pub fn is_day(&self) -> bool {
        self.current_state == TimeState::Day
    }

    pub fn is_night(&self) -> bool {
        self.current_state == TimeState::Night
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// State the in-flight transition will land on.
    pub fn target_state(&self) -> Option<TimeState> {
        self.transition.map(|transition| transition.target)
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Duration of a transition leaving the current state.
    pub fn duration(&self) -> f32 {
        self.config.duration_from(self.current_state)
    }

    /// Starts switching to the opposite state.
    ///
    /// Returns false if a transition is already running, in which case the
    /// request is dropped rather than queued.
    pub fn toggle(&mut self) -> bool {
        if self.transition.is_some() {
            debug!("Ignoring day/night toggle, transition already in progress");
            return false;
        }

        let target = self.current_state.toggled();
        let duration = self.duration();

        if duration <= 0.0 || !duration.is_finite() {
            self.apply_state(target);
        } else {
            info!(
                "Starting {:?} -> {:?} transition over {:.2}s",
                self.current_state, target, duration
            );
            self.transition = Some(ActiveTransition {
                elapsed: 0.0,
                duration,
                target,
            });
        }

        true
    }

    /// Advances the in-flight transition by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        transition.elapsed += delta;
        let t = (transition.elapsed / transition.duration).clamp(0.0, 1.0);
        let target = transition.target;

        let progress = match self.current_state {
            TimeState::Day => t,
            TimeState::Night => 1.0 - t,
        };
        self.transition_progress.notify(progress);

        if t >= 1.0 {
            self.transition = None;
            self.apply_state(target);
        }
    }

    /// Forces `state` immediately, cancelling any in-flight transition.
    pub fn set_state(&mut self, state: TimeState) {
        if let Some(cancelled) = self.transition.take() {
            debug!(
                "Cancelled transition to {:?} after {:.2}s",
                cancelled.target, cancelled.elapsed
            );
        }
        self.apply_state(state);
    }

    fn apply_state(&mut self, new_state: TimeState) {
        self.current_state = new_state;
        info!("Time of day is now {:?}", new_state);

        self.transition_progress.notify(new_state.night_weight());
        self.state_changed.notify(new_state);
    }

    pub fn on_state_changed(
        &mut self,
        callback: impl FnMut(TimeState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription();
        self.state_changed.insert(id, callback);
        id
    }

    pub fn on_transition_progress(
        &mut self,
        callback: impl FnMut(f32) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription();
        self.transition_progress.insert(id, callback);
        id
    }

    /// Removes a subscription from whichever channel holds it.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state_changed.remove(id) || self.transition_progress.remove(id)
    }

    /// Total subscriptions across both channels.
    pub fn subscriber_count(&self) -> usize {
        self.state_changed.len() + self.transition_progress.len()
    }

    fn allocate_subscription(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }
}

/// Installs `controller` as the world's single time controller.
///
/// The first installed controller wins; later attempts are rejected and the
/// existing controller is left untouched.
pub fn install_time_controller(
    world: &mut World,
    controller: TimeController,
) -> Result<(), DayNightError> {
    if world.contains_resource::<TimeController>() {
        return Err(DayNightError::ControllerAlreadyActive);
    }
    world.insert_resource(controller);
    Ok(())
}
