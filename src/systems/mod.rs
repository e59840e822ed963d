//! Session systems.
//!
//! This module groups all ECS systems that advance time, retire elements,
//! replicate countdowns and keep singleton slots current.
//!
//! Submodules overview
//! - [`billboard`] – place orbiting labels around their anchors
//! - [`ephemeral`] – tick local countdowns, despawn expired elements, slot replacement
//! - [`killfeed`] – push kill-feed rows and forget retired ones
//! - [`party`] – round script, HUD timer and avatar motion
//! - [`reload`] – capture and restore singleton state around a code reload
//! - [`replication`] – host publishing and client mirroring of countdowns
//! - [`singletons`] – per-type singleton lifecycle driver
//! - [`time`] – update simulation time and the synchronized clock

pub mod billboard;
pub mod ephemeral;
pub mod killfeed;
pub mod party;
pub mod reload;
pub mod replication;
pub mod singletons;
pub mod time;
