//! "Currently showing" slots for replaceable UI elements.
//!
//! Some elements are exclusive: only one instruction popup or one round result
//! banner may be showing at a time. [`ElementSlots`] maps a slot name to the
//! entity currently occupying it.
//!
//! Replacing an element goes through
//! [`show_in_slot`](crate::systems::ephemeral::show_in_slot), which empties the
//! slot and queues the old entity's despawn before the new entity is recorded.
//! Expiry clears a slot only if it still holds the expiring entity.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

/// Slot name used for instruction popups.
pub const INSTRUCTION_SLOT: &str = "instruction";
/// Slot name used for the round result banner.
pub const RESULT_SLOT: &str = "result";

/// Map of slot names to the element currently shown in them.
#[derive(Resource, Debug, Clone, Default)]
pub struct ElementSlots {
    pub map: FxHashMap<String, Entity>,
}

impl ElementSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element currently shown in `slot`.
    pub fn current(&self, slot: &str) -> Option<Entity> {
        self.map.get(slot).copied()
    }

    /// Empty `slot`, returning what was there.
    pub fn take(&mut self, slot: &str) -> Option<Entity> {
        self.map.remove(slot)
    }

    /// Record `entity` in `slot`, returning the previous occupant.
    pub fn set(&mut self, slot: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.map.insert(slot.into(), entity)
    }

    /// Remove `entity` from whichever slots still hold it.
    ///
    /// Returns `true` if any slot was cleared.
    pub fn release(&mut self, entity: Entity) -> bool {
        let before = self.map.len();
        self.map.retain(|_, e| *e != entity);
        self.map.len() != before
    }

    pub fn is_showing(&self, entity: Entity) -> bool {
        self.map.values().any(|e| *e == entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn release_only_clears_matching_slot() {
        let mut world = World::new();
        let old = world.spawn_empty().id();
        let new = world.spawn_empty().id();
        let mut slots = ElementSlots::new();

        slots.set(INSTRUCTION_SLOT, old);
        assert_eq!(slots.take(INSTRUCTION_SLOT), Some(old));
        slots.set(INSTRUCTION_SLOT, new);

        assert!(!slots.release(old));
        assert_eq!(slots.current(INSTRUCTION_SLOT), Some(new));
        assert!(slots.release(new));
        assert!(!slots.is_showing(new));
    }
}
