//! System for orbiting billboards.
//!
//! Recomputes every [`OrbitingBillboard`]'s [`BillboardPose`] from the
//! anchor's current [`WorldBounds`] and the [`Viewer`] eye position.
//!
//! # Missing inputs
//!
//! - No viewer: nothing is updated this frame.
//! - Anchor despawned or without bounds: that billboard keeps its last pose.
//!
//! # Related
//!
//! - [`crate::components::billboard::orbit_pose`] – the geometry

use bevy_ecs::prelude::*;

use crate::components::billboard::{BillboardPose, OrbitingBillboard, orbit_pose};
use crate::components::worldbounds::WorldBounds;
use crate::resources::viewer::Viewer;

/// Reposition billboards around their anchors, facing the viewer.
pub fn orbiting_billboard_system(
    viewer: Option<Res<Viewer>>,
    anchors: Query<&WorldBounds>,
    mut billboards: Query<(&mut OrbitingBillboard, &mut BillboardPose)>,
) {
    let Some(eye) = viewer.and_then(|v| v.eye) else {
        return;
    };
    for (mut billboard, mut pose) in billboards.iter_mut() {
        let Ok(bounds) = anchors.get(billboard.anchor) else {
            continue;
        };
        let solution = orbit_pose(bounds.center, bounds.size, eye, billboard.direction, &*pose);
        billboard.direction = solution.direction;
        *pose = solution.pose;
    }
}
