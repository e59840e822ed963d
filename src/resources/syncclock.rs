//! Synchronized clock shared between the authoritative host and its clients.
//!
//! The [`SyncClock`] resource supplies `now()` as an absolute
//! [`SyncTimestamp`] that is comparable across machines. The host advances it
//! with the unscaled frame delta; clients advance it locally between samples
//! and snap forward whenever a host sample arrives through the replication
//! link.
//!
//! Latency compensation is not done here. A client reading `now()` sees the
//! host clock as of the last received sample plus local elapsed time.
//!
//! # Related
//!
//! - [`crate::components::countdown::NetworkedCountdown`] – compares against this clock
//! - [`crate::systems::replication`] – carries host clock samples to clients

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Absolute point on the synchronized clock, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct SyncTimestamp(pub f64);

impl SyncTimestamp {
    /// Seconds since the clock origin.
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Timestamp `secs` seconds after this one.
    pub fn after(self, secs: f64) -> Self {
        SyncTimestamp(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    pub fn since(self, earlier: SyncTimestamp) -> f64 {
        self.0 - earlier.0
    }

    /// Smallest representable timestamp strictly after this one.
    ///
    /// Non-finite values are returned unchanged.
    pub fn next_quantum(self) -> Self {
        let x = self.0;
        if !x.is_finite() {
            return self;
        }
        let bits = x.to_bits();
        let next = if x == 0.0 {
            1
        } else if x > 0.0 {
            bits + 1
        } else {
            bits - 1
        };
        SyncTimestamp(f64::from_bits(next))
    }
}

/// Process-wide synchronized clock.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SyncClock {
    now: SyncTimestamp,
    authoritative: bool,
}

impl Default for SyncClock {
    fn default() -> Self {
        SyncClock::host()
    }
}

impl SyncClock {
    /// Clock owned by the authoritative host, starting at zero.
    pub fn host() -> Self {
        SyncClock {
            now: SyncTimestamp(0.0),
            authoritative: true,
        }
    }

    /// Observer clock, driven by host samples.
    pub fn client() -> Self {
        SyncClock {
            now: SyncTimestamp(0.0),
            authoritative: false,
        }
    }

    /// Builder: start the clock at a given timestamp.
    pub fn starting_at(mut self, now: SyncTimestamp) -> Self {
        self.now = now;
        self
    }

    /// Current synchronized time.
    pub fn now(&self) -> SyncTimestamp {
        self.now
    }

    /// Whether this process owns the clock.
    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    /// Advance by an unscaled frame delta. Negative deltas are ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.now = self.now.after(dt);
        }
    }

    /// Apply a host clock sample.
    ///
    /// The clock only moves forward so that countdowns observed as complete
    /// stay complete. Returns `true` if the sample moved the clock.
    pub fn resync(&mut self, host_now: SyncTimestamp) -> bool {
        if host_now > self.now {
            self.now = host_now;
            true
        } else {
            false
        }
    }
}
