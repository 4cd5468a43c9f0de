//! Day/night palette plugin.
//!
//! This plugin provides:
//! - A single [`TimeController`] that toggles between day and night
//! - Toggle key edge detection feeding [`TimeToggleEvent`]
//! - Palette listeners that blend every [`PaletteSwapper`](crate::components::PaletteSwapper)
//!   sprite between its day and night palette
//!
//! # Usage
//!
//! ```ignore
//! use bevy::prelude::*;
//! use day_night_palette::{DayNightPlugin, resources::{DayNightSettings, TransitionConfig}};
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(DayNightPlugin::new(DayNightSettings {
//!         transition: TransitionConfig::asymmetric(2.0, 0.5),
//!         ..default()
//!     }))
//!     .run();
//! ```
//!
//! Only the first instance of the plugin takes effect. Later instances find the
//! controller already installed, log a warning and add nothing.

use bevy::prelude::*;

use crate::{
    events::{SetTimeStateEvent, TimeToggleEvent},
    resources::{
        install_time_controller, DayNightSettings, PaletteListenerRegistry, TimeController,
    },
    systems::{
        palette_listener_attach_system, palette_listener_detach_system,
        palette_listener_sync_system, palette_swapper_revalidate_system, time_controller_system,
        time_toggle_input_system,
    },
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayNightSystems {
    Input,
    Advance,
    Listeners,
}

#[derive(Default)]
pub struct DayNightPlugin {
    pub settings: DayNightSettings,
}

impl DayNightPlugin {
    pub fn new(settings: DayNightSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for DayNightPlugin {
    fn build(&self, app: &mut App) {
        let controller =
            TimeController::new(self.settings.starting_state, self.settings.transition);
        if let Err(error) = install_time_controller(app.world_mut(), controller) {
            log::warn!("Day/night plugin not added: {}", error);
            return;
        }

        app.insert_resource(self.settings.clone())
            .init_resource::<PaletteListenerRegistry>()
            .add_message::<TimeToggleEvent>()
            .add_message::<SetTimeStateEvent>()
            .configure_sets(
                Update,
                (
                    DayNightSystems::Input,
                    DayNightSystems::Advance,
                    DayNightSystems::Listeners,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                time_toggle_input_system
                    .in_set(DayNightSystems::Input)
                    .run_if(resource_exists::<ButtonInput<KeyCode>>)
                    .run_if(resource_exists::<TimeController>),
            )
            .add_systems(
                Update,
                time_controller_system
                    .in_set(DayNightSystems::Advance)
                    .run_if(resource_exists::<TimeController>),
            )
            .add_systems(
                Update,
                (
                    palette_listener_detach_system,
                    palette_swapper_revalidate_system,
                    palette_listener_attach_system.run_if(resource_exists::<Assets<Image>>),
                    palette_listener_sync_system,
                )
                    .chain()
                    .in_set(DayNightSystems::Listeners),
            );

        log::info!(
            "Day/night plugin initialized, starting at {:?}, toggle key {:?}",
            self.settings.starting_state,
            self.settings.toggle_key
        );
    }

    fn is_unique(&self) -> bool {
        // Duplicates are rejected by the controller install instead.
        false
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        components::{InvalidPaletteSwapper, PaletteListener, PaletteSwapper, PaletteUniforms, TimeState},
        error::{DayNightError, PaletteSlot},
        resources::TransitionConfig,
    };

    fn test_app(settings: DayNightSettings) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Assets<Image>>()
            .add_plugins(DayNightPlugin::new(settings));
        app
    }

    fn spawn_swapper(app: &mut App) -> Entity {
        let mut images = app.world_mut().resource_mut::<Assets<Image>>();
        let day = images.add(Image::default());
        let night = images.add(Image::default());
        app.world_mut().spawn(PaletteSwapper::new(day, night)).id()
    }

    fn step(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    }

    fn release_all(app: &mut App) {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release_all();
        keyboard.clear();
    }

    fn night_weight(app: &App, entity: Entity) -> f32 {
        app.world().get::<PaletteUniforms>(entity).unwrap().is_night
    }

    fn controller(app: &App) -> &TimeController {
        app.world().resource::<TimeController>()
    }

    #[test]
    fn test_key_press_blends_listener() {
        let mut app = test_app(DayNightSettings {
            transition: TransitionConfig::symmetric(1.0),
            ..default()
        });
        let entity = spawn_swapper(&mut app);

        step(&mut app, 0.0);
        assert_eq!(night_weight(&app, entity), 0.0);

        press(&mut app, KeyCode::Tab);
        step(&mut app, 0.5);
        release_all(&mut app);
        assert_eq!(night_weight(&app, entity), 0.5);
        assert_eq!(controller(&app).current_state(), TimeState::Day);

        step(&mut app, 0.5);
        assert_eq!(night_weight(&app, entity), 1.0);
        assert_eq!(controller(&app).current_state(), TimeState::Night);
    }

    #[test]
    fn test_held_key_toggles_once() {
        let mut app = test_app(DayNightSettings::default());
        let entity = spawn_swapper(&mut app);
        step(&mut app, 0.0);

        press(&mut app, KeyCode::Tab);
        step(&mut app, 0.1);
        // Still held, but no longer just pressed
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        step(&mut app, 0.1);

        assert_eq!(controller(&app).current_state(), TimeState::Night);
        assert_eq!(night_weight(&app, entity), 1.0);
    }

    #[test]
    fn test_configured_toggle_key() {
        let mut app = test_app(DayNightSettings {
            toggle_key: KeyCode::KeyN,
            ..default()
        });
        step(&mut app, 0.0);

        press(&mut app, KeyCode::Tab);
        step(&mut app, 0.1);
        release_all(&mut app);
        assert_eq!(controller(&app).current_state(), TimeState::Day);

        press(&mut app, KeyCode::KeyN);
        step(&mut app, 0.1);
        assert_eq!(controller(&app).current_state(), TimeState::Night);
    }

    #[test]
    fn test_set_state_message() {
        let mut app = test_app(DayNightSettings {
            transition: TransitionConfig::symmetric(4.0),
            ..default()
        });
        let entity = spawn_swapper(&mut app);
        step(&mut app, 0.0);

        press(&mut app, KeyCode::Tab);
        step(&mut app, 1.0);
        release_all(&mut app);
        assert_eq!(night_weight(&app, entity), 0.25);

        app.world_mut()
            .write_message(SetTimeStateEvent::new(TimeState::Night));
        step(&mut app, 0.0);

        assert!(!controller(&app).is_transitioning());
        assert_eq!(controller(&app).current_state(), TimeState::Night);
        assert_eq!(night_weight(&app, entity), 1.0);
    }

    #[test]
    fn test_listener_starts_at_current_state() {
        let mut app = test_app(DayNightSettings {
            starting_state: TimeState::Night,
            ..default()
        });
        let entity = spawn_swapper(&mut app);

        step(&mut app, 0.0);

        assert!(app.world().get::<PaletteListener>(entity).is_some());
        assert_eq!(night_weight(&app, entity), 1.0);
    }

    #[test]
    fn test_duplicate_plugin_is_ignored() {
        let mut app = test_app(DayNightSettings {
            starting_state: TimeState::Night,
            ..default()
        });
        app.add_plugins(DayNightPlugin::new(DayNightSettings {
            starting_state: TimeState::Day,
            toggle_key: KeyCode::Space,
            ..default()
        }));
        let entity = spawn_swapper(&mut app);
        step(&mut app, 0.0);

        assert_eq!(controller(&app).current_state(), TimeState::Night);
        assert_eq!(app.world().resource::<DayNightSettings>().toggle_key, KeyCode::Tab);
        // One listener subscribed exactly once
        assert_eq!(controller(&app).subscriber_count(), 2);

        press(&mut app, KeyCode::Tab);
        step(&mut app, 0.1);
        assert_eq!(controller(&app).current_state(), TimeState::Day);
        assert_eq!(night_weight(&app, entity), 0.0);
    }

    #[test]
    fn test_missing_palette_aborts_listener() {
        let mut app = test_app(DayNightSettings::default());
        let day = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(Image::default());
        let entity = app
            .world_mut()
            .spawn(PaletteSwapper {
                day_palette: Some(day),
                ..default()
            })
            .id();

        step(&mut app, 0.0);

        let invalid = app.world().get::<InvalidPaletteSwapper>(entity).unwrap();
        assert_eq!(invalid.0, DayNightError::MissingPalette(PaletteSlot::Night));
        assert!(app.world().get::<PaletteListener>(entity).is_none());
        assert_eq!(controller(&app).subscriber_count(), 0);
    }

    fn spawn_swapper_without_night(app: &mut App) -> Entity {
        let day = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(Image::default());
        app.world_mut()
            .spawn(PaletteSwapper {
                day_palette: Some(day),
                ..default()
            })
            .id()
    }

    #[test]
    fn test_fixed_swapper_is_validated_again() {
        let mut app = test_app(DayNightSettings::default());
        let entity = spawn_swapper_without_night(&mut app);
        step(&mut app, 0.0);
        step(&mut app, 0.0);
        assert!(app.world().get::<InvalidPaletteSwapper>(entity).is_some());

        let mut images = app.world_mut().resource_mut::<Assets<Image>>();
        let day = images.add(Image::default());
        let night = images.add(Image::default());
        app.world_mut()
            .entity_mut(entity)
            .insert(PaletteSwapper::new(day, night));
        step(&mut app, 0.0);

        assert!(app.world().get::<InvalidPaletteSwapper>(entity).is_none());
        assert!(app.world().get::<PaletteListener>(entity).is_some());
        assert_eq!(controller(&app).subscriber_count(), 2);
    }

    #[test]
    fn test_removing_invalid_swapper_clears_marker() {
        let mut app = test_app(DayNightSettings::default());
        let entity = spawn_swapper_without_night(&mut app);
        step(&mut app, 0.0);
        assert!(app.world().get::<InvalidPaletteSwapper>(entity).is_some());

        app.world_mut().entity_mut(entity).remove::<PaletteSwapper>();
        step(&mut app, 0.0);

        assert!(app.world().get::<InvalidPaletteSwapper>(entity).is_none());
    }

    #[test]
    fn test_loading_palettes_keep_waiting() {
        let mut app = test_app(DayNightSettings::default());
        let day = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(Image::default());
        let entity = app
            .world_mut()
            .spawn(PaletteSwapper::new(day, Handle::default()))
            .id();

        step(&mut app, 0.0);
        step(&mut app, 0.0);

        assert!(app.world().get::<PaletteListener>(entity).is_none());
        assert!(app.world().get::<InvalidPaletteSwapper>(entity).is_none());
        assert_eq!(controller(&app).subscriber_count(), 0);
    }

    #[test]
    fn test_despawn_unsubscribes() {
        let mut app = test_app(DayNightSettings::default());
        let first = spawn_swapper(&mut app);
        let second = spawn_swapper(&mut app);
        step(&mut app, 0.0);
        assert_eq!(controller(&app).subscriber_count(), 4);

        app.world_mut().despawn(first);
        step(&mut app, 0.0);

        assert_eq!(controller(&app).subscriber_count(), 2);
        let registry = app.world().resource::<PaletteListenerRegistry>();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(first));
        assert!(registry.contains(second));
    }

    #[test]
    fn test_removing_swapper_detaches_listener() {
        let mut app = test_app(DayNightSettings::default());
        let entity = spawn_swapper(&mut app);
        step(&mut app, 0.0);

        app.world_mut().entity_mut(entity).remove::<PaletteSwapper>();
        step(&mut app, 0.0);

        assert_eq!(controller(&app).subscriber_count(), 0);
        assert!(app.world().get::<PaletteListener>(entity).is_none());
        assert!(app.world().get::<PaletteUniforms>(entity).is_none());
    }

    #[test]
    fn test_teardown_after_controller_removed() {
        let mut app = test_app(DayNightSettings::default());
        let entity = spawn_swapper(&mut app);
        step(&mut app, 0.0);

        app.world_mut().remove_resource::<TimeController>();
        app.world_mut().despawn(entity);
        step(&mut app, 0.0);

        assert!(app.world().resource::<PaletteListenerRegistry>().is_empty());
    }
}
