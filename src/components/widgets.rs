//! Data components for the party mode's transient widgets.
//!
//! These carry only what a renderer needs to draw the widget; how they look is
//! not decided here. Their lifetime comes from an
//! [`Ephemeral`](crate::components::ephemeral::Ephemeral) countdown on the same
//! entity.

use bevy_ecs::prelude::Component;

/// Instruction shown to every player ("Squat!", "Stand still!").
#[derive(Component, Clone, Debug, PartialEq)]
pub struct InstructionPopup {
    pub text: String,
}

impl InstructionPopup {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// End-of-round banner.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct RoundResultBanner {
    /// Winning player, `None` for a draw.
    pub winner: Option<String>,
}

impl RoundResultBanner {
    pub fn new(winner: Option<String>) -> Self {
        Self { winner }
    }

    pub fn headline(&self) -> String {
        match &self.winner {
            Some(name) => format!("{} wins!", name),
            None => "Draw!".to_string(),
        }
    }
}

/// One row of the kill feed.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct KillFeedEntry {
    pub attacker: String,
    pub victim: String,
}

impl KillFeedEntry {
    pub fn new(attacker: impl Into<String>, victim: impl Into<String>) -> Self {
        Self {
            attacker: attacker.into(),
            victim: victim.into(),
        }
    }
}

/// Name label floating next to a player.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlayerLabel {
    pub name: String,
}

impl PlayerLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Whole seconds to show on a countdown label; rounds up so "1" stays
/// visible until the countdown completes.
pub fn countdown_label(remaining_secs: f64) -> String {
    format!("{}", remaining_secs.max(0.0).ceil() as u64)
}
