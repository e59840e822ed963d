//! Kill-feed bookkeeping.
//!
//! The [`KillFeed`] resource keeps the rows currently on screen, oldest first,
//! and caps how many may be visible. Rows are ordinary
//! [`Ephemeral`](crate::components::ephemeral::Ephemeral) elements with a
//! [`LocalCountdown`](crate::components::localcountdown::LocalCountdown); the
//! feed only tracks their order.
//!
//! # Related
//!
//! - [`crate::systems::killfeed::push_kill_feed`] – adds a row, evicting the oldest when full
//! - [`crate::systems::killfeed::kill_feed_expired_observer`] – forgets rows that expired

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};

const DEFAULT_MAX_ENTRIES: usize = 5;

/// Visible kill-feed rows, oldest first.
#[derive(Resource, Debug, Clone)]
pub struct KillFeed {
    pub entries: VecDeque<Entity>,
    pub max_entries: usize,
}

impl Default for KillFeed {
    fn default() -> Self {
        KillFeed::new(DEFAULT_MAX_ENTRIES)
    }
}

impl KillFeed {
    /// Create a feed showing at most `max_entries` rows (at least one).
    pub fn new(max_entries: usize) -> Self {
        KillFeed {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Forget `entity`. Returns `true` if it was in the feed.
    pub fn release(&mut self, entity: Entity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| *e != entity);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_at_least_one() {
        assert_eq!(KillFeed::new(0).max_entries, 1);
        assert_eq!(KillFeed::default().max_entries, 5);
    }
}
