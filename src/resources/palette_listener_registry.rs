use std::collections::HashMap;

use bevy::prelude::*;

use super::SubscriptionId;

/// Subscriptions held by each palette listener entity.
///
/// Kept outside the entity so they can still be released after the entity
/// has been despawned.
#[derive(Resource, Default, Debug)]
pub struct PaletteListenerRegistry {
    subscriptions: HashMap<Entity, [SubscriptionId; 2]>,
}

impl PaletteListenerRegistry {
    pub fn insert(&mut self, entity: Entity, state_changed: SubscriptionId, progress: SubscriptionId) {
        self.subscriptions.insert(entity, [state_changed, progress]);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<[SubscriptionId; 2]> {
        self.subscriptions.remove(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.subscriptions.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
