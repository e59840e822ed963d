//! Network-synchronized countdown component.
//!
//! A [`NetworkedCountdown`] is either disabled or counting down to an absolute
//! expiry on the [`SyncClock`](crate::resources::syncclock::SyncClock). Since
//! only the absolute timestamp is stored, a host and its clients agree on when
//! the countdown completes regardless of when each of them received it.
//!
//! # Replication
//!
//! The value travels as the opaque `(enabled, expires_at)` pair. Receivers
//! copy it verbatim; they never rebuild `expires_at` from a duration, because
//! a duration is relative to the sender's arm time.
//!
//! # Zero-length countdowns
//!
//! Arming with `duration <= 0` places the expiry one clock quantum after
//! `now`. The countdown is therefore never complete at the instant it was
//! armed, and completes on the next clock advance.
//!
//! # Related
//!
//! - [`crate::components::localcountdown::LocalCountdown`] – unsynchronized variant
//! - [`crate::systems::ephemeral::ephemeral_expiry_system`] – despawns elements on completion
//! - [`crate::systems::replication`] – host to client transport

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::resources::syncclock::SyncTimestamp;

/// Disabled, or counting down to `expires_at` on the synchronized clock.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkedCountdown {
    enabled: bool,
    expires_at: SyncTimestamp,
}

impl NetworkedCountdown {
    /// A countdown that never completes.
    pub fn disabled() -> Self {
        NetworkedCountdown {
            enabled: false,
            expires_at: SyncTimestamp::default(),
        }
    }

    /// Start counting down `duration` seconds from `now`.
    ///
    /// The result always expires strictly after `now`.
    pub fn arm(now: SyncTimestamp, duration: f64) -> Self {
        let target = now.after(duration);
        let earliest = now.next_quantum();
        NetworkedCountdown {
            enabled: true,
            expires_at: if target >= earliest { target } else { earliest },
        }
    }

    /// Named constructor for call sites that hand over a bare duration.
    ///
    /// Equivalent to [`NetworkedCountdown::arm`].
    pub fn from_duration(now: SyncTimestamp, duration: f64) -> Self {
        Self::arm(now, duration)
    }

    /// Rebuild a countdown from its replicated pair.
    pub fn from_parts(enabled: bool, expires_at: SyncTimestamp) -> Self {
        NetworkedCountdown {
            enabled,
            expires_at,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Absolute expiry. Meaningless when disabled.
    pub fn expires_at(&self) -> SyncTimestamp {
        self.expires_at
    }

    /// `enabled && now >= expires_at`.
    pub fn is_complete(&self, now: SyncTimestamp) -> bool {
        self.enabled && now >= self.expires_at
    }

    /// Seconds left before completion; `0.0` when complete or disabled.
    pub fn remaining(&self, now: SyncTimestamp) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        self.expires_at.since(now).max(0.0)
    }
}
