//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the session world: countdowns, lifetime markers, UI widgets, billboards and
//! the party scene's own tags.
//!
//! Submodules overview:
//! - [`billboard`] – labels that orbit an anchor and face the viewer
//! - [`countdown`] – countdown expressed on the synchronized clock
//! - [`ephemeral`] – marker and constructors for self-destroying elements
//! - [`localcountdown`] – client-local countdown driven by frame deltas
//! - [`netid`] – stable cross-world identity of replicated entities
//! - [`party`] – HUD and scoreboard singletons, players and scene markers
//! - [`suppressed`] – marker that keeps a singleton instance out of its slot
//! - [`widgets`] – popup, banner, kill-feed row and name label data
//! - [`worldbounds`] – world-space center and size of an entity

pub mod billboard;
pub mod countdown;
pub mod ephemeral;
pub mod localcountdown;
pub mod netid;
pub mod party;
pub mod suppressed;
pub mod widgets;
pub mod worldbounds;
