//! Ephemeral element systems.
//!
//! This module provides the systems that retire
//! [`Ephemeral`](crate::components::ephemeral::Ephemeral) elements, plus the
//! slot replacement helper.
//!
//! - [`local_countdown_system`] – advances every [`LocalCountdown`] by the scaled delta
//! - [`ephemeral_expiry_system`] – despawns elements whose countdown completed
//! - [`show_in_slot`] – destroy-then-spawn replacement of an exclusive element
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `local_countdown_system` adds `delta` to local countdowns
//! 2. `ephemeral_expiry_system` checks networked countdowns against
//!    [`SyncClock`] and local countdowns against their elapsed time
//! 3. For each complete element it clears the element's slot, triggers
//!    [`ElementExpiredEvent`] and despawns the entity (children included)
//!
//! A despawned element is gone from every query, so it is never evaluated
//! again. `try_despawn` makes a second removal request harmless.

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::countdown::NetworkedCountdown;
use crate::components::ephemeral::Ephemeral;
use crate::components::localcountdown::LocalCountdown;
use crate::events::ephemeral::ElementExpiredEvent;
use crate::resources::elementslots::ElementSlots;
use crate::resources::syncclock::SyncClock;
use crate::resources::worldtime::WorldTime;

/// Advance every local countdown by the scaled frame delta.
pub fn local_countdown_system(world_time: Res<WorldTime>, mut query: Query<&mut LocalCountdown>) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for mut countdown in query.iter_mut() {
        countdown.tick(dt);
    }
}

/// Despawn ephemeral elements whose countdown is complete.
pub fn ephemeral_expiry_system(
    clock: Res<SyncClock>,
    synced: Query<(Entity, &NetworkedCountdown), With<Ephemeral>>,
    local: Query<(Entity, &LocalCountdown), With<Ephemeral>>,
    mut slots: Option<ResMut<ElementSlots>>,
    mut commands: Commands,
) {
    let now = clock.now();
    let mut expired: SmallVec<[Entity; 8]> = SmallVec::new();

    for (entity, countdown) in synced.iter() {
        if countdown.is_complete(now) {
            expired.push(entity);
        }
    }
    for (entity, countdown) in local.iter() {
        if countdown.is_complete() && !expired.contains(&entity) {
            expired.push(entity);
        }
    }

    if expired.is_empty() {
        return;
    }

    for entity in expired {
        if let Some(slots) = slots.as_deref_mut() {
            slots.release(entity);
        }
        debug!("Ephemeral element {:?} expired", entity);
        commands.trigger(ElementExpiredEvent { entity });
        commands.entity(entity).try_despawn();
    }
}

/// Show `bundle` in `slot`, destroying whatever was showing there.
///
/// The previous element leaves the slot and has its despawn queued before the
/// new one is spawned and recorded, so no reader of [`ElementSlots`] ever sees
/// both as current.
pub fn show_in_slot<B: Bundle>(
    commands: &mut Commands,
    slots: &mut ElementSlots,
    slot: &str,
    bundle: B,
) -> Entity {
    if let Some(previous) = slots.take(slot) {
        debug!("Slot '{}': replacing {:?}", slot, previous);
        commands.entity(previous).try_despawn();
    }
    let entity = commands.spawn(bundle).id();
    slots.set(slot, entity);
    entity
}

/// [`show_in_slot`] for exclusive-world callers (setup code, tests).
pub fn show_in_slot_world<B: Bundle>(world: &mut World, slot: &str, bundle: B) -> Entity {
    world.init_resource::<ElementSlots>();
    let previous = world.resource_mut::<ElementSlots>().take(slot);
    if let Some(previous) = previous {
        debug!("Slot '{}': replacing {:?}", slot, previous);
        if world.get_entity(previous).is_ok() {
            world.despawn(previous);
        }
    }
    let entity = world.spawn(bundle).id();
    world.resource_mut::<ElementSlots>().set(slot, entity);
    entity
}
