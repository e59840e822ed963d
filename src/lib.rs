//! Partycore library.
//!
//! Presentation-side building blocks for a networked party game: countdowns on
//! a host-authoritative clock, self-destroying UI elements, reload-safe
//! singletons and viewer-facing billboards, on top of `bevy_ecs`.
//!
//! This module exposes the crate's ECS components, resources, systems, and
//! events for use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod resources;
pub mod session;
pub mod systems;
