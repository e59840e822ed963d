//! Client-local elapsed-time countdown.
//!
//! The [`LocalCountdown`] component measures elapsed time each frame from
//! [`WorldTime`](crate::resources::worldtime::WorldTime). It is the
//! unsynchronized counterpart of
//! [`NetworkedCountdown`](crate::components::countdown::NetworkedCountdown),
//! meant for purely cosmetic elements (kill-feed entries, hit markers) that no
//! other peer needs to agree on.
//!
//! # How It Works
//!
//! 1. Entity is spawned with a `LocalCountdown` holding its duration
//! 2. `local_countdown_system` adds `delta * time_scale` to `elapsed` each frame
//! 3. Once `elapsed >= duration` the countdown reports complete
//!
//! A countdown without a positive duration is unarmed and never completes.
//!
//! # Related
//!
//! - [`crate::systems::ephemeral::local_countdown_system`] – advances elapsed time

use bevy_ecs::prelude::Component;

/// Elapsed-time countdown measured on the local clock.
///
/// The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LocalCountdown {
    /// Seconds accumulated since the countdown was armed.
    pub elapsed: f32,
    /// Seconds until completion; `None` when unarmed.
    pub duration: Option<f32>,
}

impl LocalCountdown {
    /// Create a countdown of `seconds`. Non-positive values yield an unarmed countdown.
    ///
    /// # Arguments
    ///
    /// * `seconds` - Time in seconds before the countdown completes
    pub fn new(seconds: f32) -> Self {
        LocalCountdown {
            elapsed: 0.0,
            duration: (seconds > 0.0).then_some(seconds),
        }
    }

    /// A countdown that never completes until re-armed.
    pub fn unarmed() -> Self {
        LocalCountdown {
            elapsed: 0.0,
            duration: None,
        }
    }

    /// Restart with a fresh duration; non-positive values disarm.
    pub fn rearm(&mut self, seconds: f32) {
        *self = LocalCountdown::new(seconds);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.duration.is_some() {
            self.elapsed += dt;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.duration.is_some_and(|d| self.elapsed >= d)
    }

    /// Seconds left, `None` when unarmed.
    pub fn remaining(&self) -> Option<f32> {
        self.duration.map(|d| (d - self.elapsed).max(0.0))
    }
}
