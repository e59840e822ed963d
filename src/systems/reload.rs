//! Live code reload bracket.
//!
//! A reload tears the world down and recreates it. The reload notification
//! calls into this module exactly twice:
//!
//! 1. [`capture_reload_state`] strictly before teardown begins. Every type in
//!    [`SingletonTypes`] records whether its instances were active.
//! 2. [`restore_reload_state`] strictly after recreation completes, before the
//!    next update pass. Every type re-establishes its registration on the
//!    recreated instance.
//!
//! No frame runs between the two calls, so no system observes a half-restored
//! registry.
//!
//! When several instances of a type exist after recreation, the restored one is
//! the instance with the lowest [`Entity`] id. Ids are recycled, so this is a
//! stable tiebreak rather than spawn order. Recreated instances are not
//! activated again by the lifecycle system: the restored slot stays as is
//! until a later lifecycle event changes it.

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::reloadstate::ReloadStateBag;
use crate::resources::singletons::{Singleton, SingletonRegistry, SingletonTypes};

/// Capture the reload state of every registered singleton type.
pub fn capture_reload_state(world: &mut World) -> ReloadStateBag {
    let hooks = world
        .get_resource::<SingletonTypes>()
        .map(|types| types.hooks().to_vec())
        .unwrap_or_default();
    let mut bag = ReloadStateBag::new();
    for hook in &hooks {
        (hook.capture)(world, &mut bag);
    }
    info!("Captured reload state for {} singleton types", bag.len());
    bag
}

/// Restore every registered singleton type from `bag`.
pub fn restore_reload_state(world: &mut World, bag: &ReloadStateBag) {
    world.init_resource::<SingletonRegistry>();
    let hooks = world
        .get_resource::<SingletonTypes>()
        .map(|types| types.hooks().to_vec())
        .unwrap_or_default();
    if hooks.is_empty() {
        warn!("Reload restore with no registered singleton types");
    }
    for hook in &hooks {
        (hook.restore)(world, bag);
    }
}

/// Restore from the serialized bag text.
///
/// Unreadable text is logged and treated as an empty bag.
pub fn restore_reload_state_from_json(world: &mut World, text: &str) {
    let bag = match ReloadStateBag::from_json(text) {
        Ok(bag) => bag,
        Err(e) => {
            warn!("{}; restoring as if nothing was active", e);
            ReloadStateBag::new()
        }
    };
    restore_reload_state(world, &bag);
}

/// Capture hook for one singleton type.
pub fn capture_singleton<T: Singleton>(world: &mut World, bag: &mut ReloadStateBag) {
    let instances: Vec<Entity> = world
        .query_filtered::<Entity, With<T>>()
        .iter(world)
        .collect();
    let Some(registry) = world.get_resource::<SingletonRegistry>() else {
        bag.record_singleton(T::KEY, false);
        return;
    };
    if instances.is_empty() {
        bag.record_singleton(T::KEY, false);
    }
    for instance in instances {
        registry.capture_reload_state::<T>(instance, bag);
    }
    debug!(
        "Captured singleton {}: was_active={}",
        T::KEY.as_str(),
        bag.singleton_was_active(T::KEY)
    );
}

/// Restore hook for one singleton type.
pub fn restore_singleton<T: Singleton>(world: &mut World, bag: &ReloadStateBag) {
    let recreated: Vec<Entity> = world
        .query_filtered::<Entity, With<T>>()
        .iter(world)
        .collect();
    let first = recreated.iter().copied().min();
    world
        .resource_mut::<SingletonRegistry>()
        .mark_restored::<T>(recreated);
    let Some(instance) = first else {
        if bag.singleton_was_active(T::KEY) {
            warn!(
                "Singleton {} was active before reload but has no instance after it",
                T::KEY.as_str()
            );
        }
        return;
    };
    world
        .resource_mut::<SingletonRegistry>()
        .restore_reload_state::<T>(instance, bag);
}
