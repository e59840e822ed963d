//! Party-mode scene components.
//!
//! - [`PartyHud`] and [`Scoreboard`] are singletons: the HUD layer looks them
//!   up through the [`SingletonRegistry`](crate::resources::singletons::SingletonRegistry)
//!   instead of holding entity ids.
//! - [`ReloadScoped`] marks entities torn down and recreated by a code reload.
//! - [`UiRoot`] parents transient widgets and survives reloads.
//! - [`RoundTimer`] tags the entity carrying the round's networked countdown.
//! - [`Player`] tags player avatars.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;

use crate::resources::singletons::{Singleton, SingletonKey};

/// Heads-up display of the party round.
#[derive(Component, Clone, Debug, Default)]
pub struct PartyHud {
    /// Seconds-left text of the round timer.
    pub timer_text: String,
}

impl Singleton for PartyHud {
    const KEY: SingletonKey = SingletonKey::new("party_hud");
}

/// Per-player kill count for the current round.
#[derive(Component, Clone, Debug, Default)]
pub struct Scoreboard {
    pub scores: FxHashMap<String, u32>,
}

impl Scoreboard {
    pub fn add_kill(&mut self, player: &str) {
        *self.scores.entry(player.to_string()).or_insert(0) += 1;
    }

    pub fn score(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// Highest score, `None` on an empty board or a tie for first.
    pub fn leader(&self) -> Option<&str> {
        let best = self.scores.values().copied().max()?;
        let mut leaders = self.scores.iter().filter(|(_, s)| **s == best);
        let (name, _) = leaders.next()?;
        if leaders.next().is_some() {
            return None;
        }
        Some(name.as_str())
    }
}

impl Singleton for Scoreboard {
    const KEY: SingletonKey = SingletonKey::new("scoreboard");
}

/// Entity recreated by a code reload.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ReloadScoped;

/// Parent of transient UI widgets.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct UiRoot;

/// Entity holding the round's networked countdown.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct RoundTimer;

/// Player avatar.
#[derive(Component, Clone, Debug)]
pub struct Player {
    pub name: String,
    /// Seat index, fixes the avatar's lap phase.
    pub seat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_requires_unique_best() {
        let mut board = Scoreboard::default();
        assert_eq!(board.leader(), None);
        board.add_kill("Ana");
        board.add_kill("Bo");
        assert_eq!(board.leader(), None);
        board.add_kill("Ana");
        assert_eq!(board.leader(), Some("Ana"));
        assert_eq!(board.score("Ana"), 2);
        assert_eq!(board.score("Cy"), 0);
    }
}
