//! Viewer position resource.
//!
//! Holds the local camera's eye position, written each frame by the camera
//! owner. `None` means there is no viewer yet (loading, spectator transition),
//! in which case view-dependent systems keep their last result.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

/// Eye position of the local viewer.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Viewer {
    pub eye: Option<Vec3>,
}

impl Viewer {
    pub fn at(eye: Vec3) -> Self {
        Self { eye: Some(eye) }
    }

    pub fn set(&mut self, eye: Vec3) {
        self.eye = Some(eye);
    }

    pub fn clear(&mut self) {
        self.eye = None;
    }
}
