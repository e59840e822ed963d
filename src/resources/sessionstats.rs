//! Session counters reported when a session ends.

use bevy_ecs::prelude::*;

use crate::events::ephemeral::ElementExpiredEvent;

/// Running totals for one world.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub popups_shown: u32,
    pub kills: u32,
    pub elements_expired: u32,
    pub reloads: u32,
}

/// Observer that counts expired elements.
pub fn count_expired_observer(
    _trigger: On<ElementExpiredEvent>,
    stats: Option<ResMut<SessionStats>>,
) {
    if let Some(mut stats) = stats {
        stats.elements_expired += 1;
    }
}
