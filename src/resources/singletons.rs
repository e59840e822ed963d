//! Process-wide singleton registry.
//!
//! Behaviors that must be addressable as "the" instance (the party HUD, the
//! scoreboard) implement [`Singleton`] with a stable [`SingletonKey`]. The
//! [`SingletonRegistry`] resource tracks, per key, which entity is the
//! canonical active instance. It stores a plain [`Entity`] handle and never
//! keeps the entity alive.
//!
//! # Lifecycle
//!
//! - Activation overwrites the slot when the instance is eligible. The most
//!   recently activated eligible instance wins.
//! - Deactivation clears the slot only if it still holds that same instance,
//!   so a stale instance tearing down late cannot erase a newer registration.
//! - Across a code reload the "was active" flag is captured into a
//!   [`ReloadStateBag`] and restored onto the recreated instance. Recreated
//!   instances skip normal activation, so the restored slot is final.
//!
//! The per-type calls are made by
//! [`singleton_lifecycle_system`](crate::systems::singletons::singleton_lifecycle_system);
//! the reload bracket by [`crate::systems::reload`].

use std::any::{TypeId, type_name};

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::resources::reloadstate::ReloadStateBag;
use crate::systems::reload::{capture_singleton, restore_singleton};

/// Stable identifier of a singleton type.
///
/// Used as the registry slot and as the reload state key, so it must not
/// change between builds that are hot-reloaded into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SingletonKey(&'static str);

impl SingletonKey {
    pub const fn new(name: &'static str) -> Self {
        SingletonKey(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// A component type with at most one active instance.
pub trait Singleton: Component {
    const KEY: SingletonKey;
}

/// Active instance per singleton type.
#[derive(Resource, Debug, Default, Clone)]
pub struct SingletonRegistry {
    slots: FxHashMap<SingletonKey, Entity>,
    /// Instances set up by a reload restore whose activation is still pending.
    restored: FxHashMap<SingletonKey, Vec<Entity>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `instance` as active for `T` if it is eligible.
    ///
    /// Returns `true` if the slot now holds `instance`.
    pub fn on_activate<T: Singleton>(&mut self, instance: Entity, eligible: bool) -> bool {
        if !eligible {
            debug!(
                "Singleton {}: {:?} activated while suppressed, ignored",
                T::KEY.as_str(),
                instance
            );
            return false;
        }
        match self.slots.insert(T::KEY, instance) {
            Some(previous) if previous != instance => debug!(
                "Singleton {}: {:?} replaces {:?}",
                T::KEY.as_str(),
                instance,
                previous
            ),
            _ => {}
        }
        true
    }

    /// Clear the slot for `T` if `instance` is the one recorded.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn on_deactivate<T: Singleton>(&mut self, instance: Entity) -> bool {
        match self.slots.get(&T::KEY) {
            Some(active) if *active == instance => {
                self.slots.remove(&T::KEY);
                true
            }
            Some(active) => {
                debug!(
                    "Singleton {}: stale deactivation of {:?} ignored, {:?} stays active",
                    T::KEY.as_str(),
                    instance,
                    active
                );
                false
            }
            None => false,
        }
    }

    /// Current active instance of `T`, if any.
    pub fn instance<T: Singleton>(&self) -> Option<Entity> {
        self.instance_by_key(T::KEY)
    }

    pub fn instance_by_key(&self, key: SingletonKey) -> Option<Entity> {
        self.slots.get(&key).copied()
    }

    pub fn is_active<T: Singleton>(&self, instance: Entity) -> bool {
        self.instance::<T>() == Some(instance)
    }

    /// Record into `bag` whether `instance`, about to be torn down, is the active one.
    pub fn capture_reload_state<T: Singleton>(&self, instance: Entity, bag: &mut ReloadStateBag) {
        bag.record_singleton(T::KEY, self.is_active::<T>(instance));
    }

    /// Re-establish `instance` as active if the bag says its predecessor was.
    ///
    /// Eligibility is not re-checked. Missing state means "was not active".
    /// Returns `true` if the slot was restored.
    pub fn restore_reload_state<T: Singleton>(
        &mut self,
        instance: Entity,
        bag: &ReloadStateBag,
    ) -> bool {
        if !bag.singleton_was_active(T::KEY) {
            return false;
        }
        self.slots.insert(T::KEY, instance);
        debug!(
            "Singleton {}: restored {:?} after reload",
            T::KEY.as_str(),
            instance
        );
        true
    }

    /// Remember the instances recreated by a reload so their first lifecycle
    /// pass does not activate them again.
    pub fn mark_restored<T: Singleton>(&mut self, instances: Vec<Entity>) {
        self.restored.insert(T::KEY, instances);
    }

    /// Take the instances recorded by [`mark_restored`](Self::mark_restored).
    pub fn take_restored<T: Singleton>(&mut self) -> Vec<Entity> {
        self.restored.remove(&T::KEY).unwrap_or_default()
    }

    /// Number of types with an active instance.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Reload hooks for one registered singleton type.
#[derive(Clone, Copy)]
pub struct SingletonHooks {
    pub key: SingletonKey,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub capture: fn(&mut World, &mut ReloadStateBag),
    pub restore: fn(&mut World, &ReloadStateBag),
}

/// Every singleton type known to this world, in registration order.
#[derive(Resource, Default, Clone)]
pub struct SingletonTypes {
    hooks: Vec<SingletonHooks>,
}

impl SingletonTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`. Returns `Ok(false)` if `T` was already registered; two
    /// types sharing a key is an error.
    pub fn register<T: Singleton>(&mut self) -> Result<bool, String> {
        let type_id = TypeId::of::<T>();
        if let Some(existing) = self.hooks.iter().find(|h| h.key == T::KEY) {
            if existing.type_id == type_id {
                return Ok(false);
            }
            warn!(
                "Singleton key '{}' claimed by both {} and {}",
                T::KEY.as_str(),
                existing.type_name,
                type_name::<T>()
            );
            return Err(format!(
                "Singleton key '{}' already registered by {}",
                T::KEY.as_str(),
                existing.type_name
            ));
        }
        self.hooks.push(SingletonHooks {
            key: T::KEY,
            type_id,
            type_name: type_name::<T>(),
            capture: capture_singleton::<T>,
            restore: restore_singleton::<T>,
        });
        Ok(true)
    }

    pub fn hooks(&self) -> &[SingletonHooks] {
        &self.hooks
    }

    pub fn contains(&self, key: SingletonKey) -> bool {
        self.hooks.iter().any(|h| h.key == key)
    }
}
