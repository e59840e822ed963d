//! Singleton lifecycle driver.
//!
//! This module provides the per-type [`singleton_lifecycle_system`] that turns
//! entity lifecycle changes into explicit
//! [`SingletonRegistry`](crate::resources::singletons::SingletonRegistry)
//! calls, and [`register_singleton`] which wires a type into a world and a
//! schedule.
//!
//! # System Flow
//!
//! Each frame, for one singleton type `T`:
//!
//! 1. Deactivate entities that lost `T` (removed or despawned)
//! 2. Deactivate live instances that just received [`Suppressed`]
//! 3. Activate entities that just received `T`, if not suppressed and not
//!    recreated by a reload restore
//! 4. Activate instances whose [`Suppressed`] marker was removed
//! 5. Trigger [`SingletonChangedEvent`] if the active instance changed
//!
//! Deactivations are applied before activations so that an instance replaced
//! within the same frame never clears its successor.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::suppressed::Suppressed;
use crate::events::singleton::SingletonChangedEvent;
use crate::resources::singletons::{Singleton, SingletonRegistry, SingletonTypes};

/// System set holding every singleton lifecycle system.
///
/// Systems that read the registry should run after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SingletonLifecycle;

/// Keep the registry slot for `T` in step with entity lifecycles.
pub fn singleton_lifecycle_system<T: Singleton>(
    mut registry: ResMut<SingletonRegistry>,
    mut removed: RemovedComponents<T>,
    mut unsuppressed: RemovedComponents<Suppressed>,
    added: Query<(Entity, Has<Suppressed>), Added<T>>,
    newly_suppressed: Query<(Entity, Ref<T>), Added<Suppressed>>,
    eligible: Query<(), (With<T>, Without<Suppressed>)>,
    mut commands: Commands,
) {
    let before = registry.instance::<T>();
    let restored = registry.take_restored::<T>();

    for entity in removed.read() {
        registry.on_deactivate::<T>(entity);
    }
    for (entity, component) in newly_suppressed.iter() {
        // Spawned already suppressed: never activated, nothing to undo.
        if !component.is_added() {
            registry.on_deactivate::<T>(entity);
        }
    }

    for (entity, suppressed) in added.iter() {
        if restored.contains(&entity) {
            continue;
        }
        registry.on_activate::<T>(entity, !suppressed);
    }
    for entity in unsuppressed.read() {
        if eligible.contains(entity) {
            registry.on_activate::<T>(entity, true);
        }
    }

    let after = registry.instance::<T>();
    if before != after {
        commands.trigger(SingletonChangedEvent {
            key: T::KEY,
            previous: before,
            current: after,
        });
    }
}

/// Register `T` as a singleton in `world` and drive it from `schedule`.
///
/// Inserts [`SingletonRegistry`] and [`SingletonTypes`] if missing and adds
/// [`singleton_lifecycle_system::<T>`] to the [`SingletonLifecycle`] set.
/// Registering a type twice schedules it once. A key collision with another
/// type is logged and the type is not scheduled.
pub fn register_singleton<T: Singleton>(world: &mut World, schedule: &mut Schedule) {
    world.init_resource::<SingletonRegistry>();
    world.init_resource::<SingletonTypes>();
    match world.resource_mut::<SingletonTypes>().register::<T>() {
        Ok(true) => {
            schedule.add_systems(singleton_lifecycle_system::<T>.in_set(SingletonLifecycle));
        }
        Ok(false) => {}
        Err(e) => error!("{}", e),
    }
}
