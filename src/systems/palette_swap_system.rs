use bevy::{asset::LoadState, prelude::*};

use crate::components::{
    InvalidPaletteSwapper, NightWeight, PaletteListener, PaletteSwapper, PaletteUniforms,
};
use crate::resources::{PaletteListenerRegistry, TimeController};

/// Subscribes newly spawned [`PaletteSwapper`] entities to the time controller.
///
/// Swappers missing a palette, or whose palette failed to load, are tagged with
/// [`InvalidPaletteSwapper`] and do not subscribe. Swappers whose palettes are
/// still loading are retried on a later frame.
pub fn palette_listener_attach_system(
    mut commands: Commands,
    images: Res<Assets<Image>>,
    asset_server: Option<Res<AssetServer>>,
    controller: Option<ResMut<TimeController>>,
    mut registry: ResMut<PaletteListenerRegistry>,
    query: Query<
        (Entity, &PaletteSwapper),
        (Without<PaletteListener>, Without<InvalidPaletteSwapper>),
    >,
) {
    let Some(mut controller) = controller else {
        return;
    };

    for (entity, swapper) in query.iter() {
        let resolved = swapper
            .check_palette_loads(|handle| {
                asset_server.as_ref().is_some_and(|server| {
                    matches!(server.get_load_state(handle.id()), Some(LoadState::Failed(_)))
                })
            })
            .and_then(|_| swapper.resolve(&images));
        let mut uniforms = match resolved {
            Ok(Some(uniforms)) => uniforms,
            Ok(None) => continue,
            Err(error) => {
                error!("Palette swapper on entity {:?} is misconfigured: {}", entity, error);
                commands.entity(entity).insert(InvalidPaletteSwapper(error));
                continue;
            }
        };

        let weight = NightWeight::new(controller.current_state().night_weight());
        uniforms.is_night = weight.get();

        let state_weight = weight.clone();
        let state_changed = controller.on_state_changed(move |state| {
            state_weight.set(state.night_weight());
        });
        let progress_weight = weight.clone();
        let progress = controller.on_transition_progress(move |p| {
            progress_weight.set(p);
        });
        registry.insert(entity, state_changed, progress);

        commands
            .entity(entity)
            .insert((PaletteListener { weight }, uniforms));
        debug!("Palette listener attached to entity {:?}", entity);
    }
}

/// Copies each listener's night weight into its [`PaletteUniforms`].
pub fn palette_listener_sync_system(
    mut query: Query<(&PaletteListener, &mut PaletteUniforms)>,
) {
    for (listener, mut uniforms) in query.iter_mut() {
        let weight = listener.weight.get();
        if uniforms.is_night != weight {
            uniforms.is_night = weight;
        }
    }
}

/// Releases the subscriptions of swappers that were removed or despawned.
///
/// If the time controller is already gone the subscriptions are simply dropped.
pub fn palette_listener_detach_system(
    mut commands: Commands,
    mut removed: RemovedComponents<PaletteSwapper>,
    mut controller: Option<ResMut<TimeController>>,
    mut registry: ResMut<PaletteListenerRegistry>,
) {
    for entity in removed.read() {
        if let Some(subscriptions) = registry.remove(entity) {
            match controller.as_mut() {
                Some(controller) => {
                    for id in subscriptions {
                        controller.unsubscribe(id);
                    }
                }
                None => debug!(
                    "Time controller already removed, dropping subscriptions of {:?}",
                    entity
                ),
            }
        }

        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<(PaletteListener, PaletteUniforms, InvalidPaletteSwapper)>();
        }
    }
}

/// Clears the rejection of swappers that were edited so they are validated again.
pub fn palette_swapper_revalidate_system(
    mut commands: Commands,
    query: Query<Entity, (With<InvalidPaletteSwapper>, Changed<PaletteSwapper>)>,
) {
    for entity in query.iter() {
        debug!("Palette swapper on entity {:?} changed, validating again", entity);
        commands.entity(entity).remove::<InvalidPaletteSwapper>();
    }
}
