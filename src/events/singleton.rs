//! Singleton registration change events.
//!
//! When the active instance of a singleton type changes (activation,
//! deactivation, or a newer instance taking over) the lifecycle system
//! triggers a [`SingletonChangedEvent`]. Observers can use it to rebind UI or
//! log ownership changes.
//!
//! # Related
//!
//! - [`crate::systems::singletons::singleton_lifecycle_system`] – emits this event
//! - [`crate::resources::singletons::SingletonRegistry`] – the registry itself

use bevy_ecs::prelude::*;
use log::info;

use crate::resources::singletons::SingletonKey;

/// Event emitted when a singleton slot changes owner.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingletonChangedEvent {
    /// The singleton type whose slot changed.
    pub key: SingletonKey,
    /// Active instance before the change.
    pub previous: Option<Entity>,
    /// Active instance after the change.
    pub current: Option<Entity>,
}

/// Observer that logs singleton ownership changes.
pub fn singleton_changed_observer(trigger: On<SingletonChangedEvent>) {
    let event = trigger.event();
    info!(
        "Singleton {} active instance: {:?} -> {:?}",
        event.key.as_str(),
        event.previous,
        event.current
    );
}
