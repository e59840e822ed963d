//! Scripted party round.
//!
//! Gameplay rules (squat detection, scoring) live elsewhere; what reaches this
//! crate is a timeline of UI-relevant happenings. [`RoundScript`] holds that
//! timeline on the synchronized clock and hands out due actions each frame.
//!
//! Host and clients run the same script, so they spawn matching elements and
//! allocate matching [`NetId`]s in the same order. Only the host arms the
//! elements' countdowns; clients receive them through replication.

use bevy_ecs::prelude::Resource;

use crate::components::netid::NetId;
use crate::resources::syncclock::SyncTimestamp;

/// Network id of the round timer entity.
pub const ROUND_TIMER_NET_ID: NetId = NetId(0);

/// Something the round wants shown.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundAction {
    /// Replace the instruction popup.
    Instruction(String),
    /// Add a kill-feed row and score the attacker.
    Kill { attacker: String, victim: String },
    /// Show the result banner for the current scoreboard leader.
    Result,
}

/// An action scheduled at an absolute synchronized time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    pub at: SyncTimestamp,
    pub action: RoundAction,
}

impl ScriptedEvent {
    pub fn new(at: f64, action: RoundAction) -> Self {
        Self {
            at: SyncTimestamp(at),
            action,
        }
    }
}

/// Timeline of the current round.
#[derive(Resource, Debug, Clone)]
pub struct RoundScript {
    /// Round length in seconds, used to arm the round timer.
    pub round_seconds: f64,
    events: Vec<ScriptedEvent>,
    next: usize,
    next_net_id: u32,
}

impl RoundScript {
    /// Build a script; events are ordered by time.
    pub fn new(round_seconds: f64, mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by(|a, b| a.at.0.total_cmp(&b.at.0));
        RoundScript {
            round_seconds,
            events,
            next: 0,
            next_net_id: ROUND_TIMER_NET_ID.0 + 1,
        }
    }

    /// The squat-off round used by the headless session.
    pub fn squat_off() -> Self {
        let kill = |attacker: &str, victim: &str| RoundAction::Kill {
            attacker: attacker.to_string(),
            victim: victim.to_string(),
        };
        let say = |text: &str| RoundAction::Instruction(text.to_string());
        RoundScript::new(
            12.0,
            vec![
                ScriptedEvent::new(0.5, say("Get ready!")),
                ScriptedEvent::new(2.0, say("Squat!")),
                ScriptedEvent::new(2.5, kill("Ana", "Bo")),
                ScriptedEvent::new(3.0, kill("Cy", "Dee")),
                ScriptedEvent::new(3.2, kill("Ana", "Cy")),
                ScriptedEvent::new(3.4, kill("Bo", "Dee")),
                ScriptedEvent::new(4.0, say("Stand up!")),
                ScriptedEvent::new(5.0, kill("Ana", "Dee")),
                ScriptedEvent::new(6.0, say("Squat!")),
                ScriptedEvent::new(7.0, kill("Dee", "Bo")),
                ScriptedEvent::new(12.0, RoundAction::Result),
            ],
        )
    }

    /// Remove and return every action scheduled at or before `now`.
    pub fn take_due(&mut self, now: SyncTimestamp) -> Vec<RoundAction> {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].at <= now {
            self.next += 1;
        }
        self.events[start..self.next]
            .iter()
            .map(|e| e.action.clone())
            .collect()
    }

    /// Allocate the next element network id.
    pub fn alloc_net_id(&mut self) -> NetId {
        let id = NetId(self.next_net_id);
        self.next_net_id += 1;
        id
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }
}
