//! Time update systems.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! and [`SyncClock`](crate::resources::syncclock::SyncClock) resources once
//! per frame, before the update schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::syncclock::SyncClock;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Advance the synchronized clock by the unscaled frame delta.
///
/// Slow-motion never affects the synchronized clock: host and clients must
/// agree on it regardless of local time scale.
pub fn advance_sync_clock(world: &mut World, dt: f32) {
    if let Some(mut clock) = world.get_resource_mut::<SyncClock>() {
        clock.advance(dt as f64);
    }
}
