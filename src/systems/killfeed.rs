//! Kill-feed row management.
//!
//! Rows are client-local ephemeral elements. [`push_kill_feed`] spawns a row
//! and, when the feed is full, destroys the oldest one first.
//! [`kill_feed_expired_observer`] drops rows from the [`KillFeed`] when their
//! countdown retires them.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::ephemeral::Ephemeral;
use crate::components::widgets::KillFeedEntry;
use crate::events::ephemeral::ElementExpiredEvent;
use crate::resources::killfeed::KillFeed;

/// Spawn a kill-feed row that lives for `seconds`.
///
/// The oldest rows are despawned first while the feed is at capacity.
pub fn push_kill_feed(
    commands: &mut Commands,
    feed: &mut KillFeed,
    entry: KillFeedEntry,
    seconds: f32,
) -> Entity {
    while feed.entries.len() >= feed.max_entries {
        let Some(oldest) = feed.entries.pop_front() else {
            break;
        };
        debug!("Kill feed full, evicting {:?}", oldest);
        commands.entity(oldest).try_despawn();
    }
    let entity = commands.spawn((entry, Ephemeral::local(seconds))).id();
    feed.entries.push_back(entity);
    entity
}

/// Observer that forgets expired rows.
pub fn kill_feed_expired_observer(
    trigger: On<ElementExpiredEvent>,
    feed: Option<ResMut<KillFeed>>,
) {
    if let Some(mut feed) = feed {
        feed.release(trigger.event().entity);
    }
}
