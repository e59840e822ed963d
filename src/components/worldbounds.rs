use bevy_ecs::prelude::Component;
use glam::Vec3;

/// World-space bounding box of an entity, published by whatever owns its
/// physics or model. Z is up.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
}

impl WorldBounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }
}
