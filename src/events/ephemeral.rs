//! Ephemeral element expiration events.
//!
//! When an [`Ephemeral`](crate::components::ephemeral::Ephemeral) element's
//! countdown completes, an [`ElementExpiredEvent`] is triggered right before
//! the entity is despawned. Observers still see the entity and its components
//! while handling the event.
//!
//! # Related
//!
//! - [`crate::systems::ephemeral::ephemeral_expiry_system`] – emits this event
//! - [`crate::systems::killfeed::kill_feed_expired_observer`] – drops expired feed rows

use bevy_ecs::prelude::*;

/// Event emitted when an ephemeral element expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementExpiredEvent {
    /// The element about to be despawned.
    pub entity: Entity,
}
