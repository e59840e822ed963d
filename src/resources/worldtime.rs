use bevy_ecs::prelude::Resource;

/// Local, scaled simulation time.
///
/// Drives client-local cosmetic countdowns such as
/// [`LocalCountdown`](crate::components::localcountdown::LocalCountdown).
/// Networked state uses [`SyncClock`](crate::resources::syncclock::SyncClock)
/// instead.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Builder: set the time scale.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
