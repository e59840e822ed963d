//! Suppression marker component.
//!
//! An entity carrying [`Suppressed`] exists but is not live: it is not eligible
//! to become the active instance of a
//! [`Singleton`](crate::resources::singletons::Singleton), and inserting the
//! marker on the active instance deactivates it. Removing the marker makes the
//! entity eligible again.

use bevy_ecs::prelude::Component;

/// Tag component marking an entity as inactive.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Suppressed;
