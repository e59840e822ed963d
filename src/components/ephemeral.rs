//! Self-expiring element marker.
//!
//! An entity with [`Ephemeral`] is destroyed by
//! [`ephemeral_expiry_system`](crate::systems::ephemeral::ephemeral_expiry_system)
//! as soon as its countdown completes. The countdown is either a
//! [`NetworkedCountdown`] (state every peer must agree on, such as an
//! instruction popup) or a [`LocalCountdown`] (cosmetic, client-only).
//!
//! An element built with a non-positive lifetime is not armed: it stays alive
//! until despawned by hand or until its countdown is armed with a positive
//! duration.
//!
//! To replace a showing element, despawn it and spawn a new one (see
//! [`show_in_slot`](crate::systems::ephemeral::show_in_slot)); do not re-arm a
//! live element's countdown.

use bevy_ecs::prelude::Component;

use crate::components::countdown::NetworkedCountdown;
use crate::components::localcountdown::LocalCountdown;
use crate::resources::syncclock::SyncTimestamp;

/// Tag component: despawn this entity when its countdown completes.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Ephemeral;

impl Ephemeral {
    /// Bundle for an element whose lifetime is agreed across the network.
    ///
    /// Non-positive `seconds` yields a disabled countdown.
    pub fn synced(now: SyncTimestamp, seconds: f64) -> (Ephemeral, NetworkedCountdown) {
        let countdown = if seconds > 0.0 {
            NetworkedCountdown::from_duration(now, seconds)
        } else {
            NetworkedCountdown::disabled()
        };
        (Ephemeral, countdown)
    }

    /// Bundle for an element that waits for its countdown from the host.
    pub fn awaiting_host() -> (Ephemeral, NetworkedCountdown) {
        (Ephemeral, NetworkedCountdown::disabled())
    }

    /// Bundle for a client-local cosmetic element.
    pub fn local(seconds: f32) -> (Ephemeral, LocalCountdown) {
        (Ephemeral, LocalCountdown::new(seconds))
    }
}
