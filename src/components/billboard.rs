//! World-space labels that orbit their anchor to face the viewer.
//!
//! An [`OrbitingBillboard`] sits on the rim of a circle around its anchor's
//! bounds, on the side closest to the viewer, at the anchor's height. Its
//! [`BillboardPose`] is rebuilt from scratch every frame by
//! [`orbiting_billboard_system`](crate::systems::billboard::orbiting_billboard_system),
//! so it never drifts away from a moving anchor.
//!
//! # Geometry
//!
//! The world is Z-up. With anchor center `c`, anchor size `s` and viewer eye `v`:
//!
//! - `dir = normalize((v - c) projected onto XY)`
//! - `radius = |s| * 0.5`
//! - `position = (c.x + dir.x * radius, c.y + dir.y * radius, c.z)`
//! - the label faces from `position` toward `v`
//!
//! When the viewer is straight above or below the anchor the horizontal vector
//! is zero; the previous `dir` is kept. A billboard that never had a direction
//! uses +X.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

/// Local axis a billboard's front face points along.
pub const BILLBOARD_FORWARD: Vec3 = Vec3::X;

/// Component that keeps a label orbiting `anchor`, facing the viewer.
#[derive(Component, Clone, Copy, Debug)]
#[require(BillboardPose)]
pub struct OrbitingBillboard {
    /// The entity to orbit. Not owned.
    pub anchor: Entity,
    /// Last horizontal orbit direction (unit length, z = 0).
    pub direction: Vec3,
}

impl OrbitingBillboard {
    pub fn new(anchor: Entity) -> Self {
        Self {
            anchor,
            direction: BILLBOARD_FORWARD,
        }
    }
}

/// Computed world pose of a billboard.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BillboardPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// Unit vector from `position` toward the viewer.
    pub forward: Vec3,
}

impl Default for BillboardPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            forward: BILLBOARD_FORWARD,
        }
    }
}

/// Result of one orbit evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSolution {
    pub direction: Vec3,
    pub pose: BillboardPose,
}

/// Orbit radius for an anchor of the given size.
pub fn orbit_radius(size: Vec3) -> f32 {
    size.length() * 0.5
}

/// Compute a billboard pose from scratch.
///
/// `previous_direction` and `previous_pose` only serve as fallbacks for the
/// degenerate cases; they never blend into the result.
pub fn orbit_pose(
    center: Vec3,
    size: Vec3,
    eye: Vec3,
    previous_direction: Vec3,
    previous_pose: &BillboardPose,
) -> OrbitSolution {
    let to_viewer = eye - center;
    let flat = Vec3::new(to_viewer.x, to_viewer.y, 0.0);
    let direction = flat.try_normalize().unwrap_or(previous_direction);

    let radius = orbit_radius(size);
    let position = Vec3::new(
        center.x + direction.x * radius,
        center.y + direction.y * radius,
        center.z,
    );

    let (forward, rotation) = match (eye - position).try_normalize() {
        Some(forward) => (forward, Quat::from_rotation_arc(BILLBOARD_FORWARD, forward)),
        None => (previous_pose.forward, previous_pose.rotation),
    };

    OrbitSolution {
        direction,
        pose: BillboardPose {
            position,
            rotation,
            forward,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_radius_is_half_size_magnitude() {
        assert!((orbit_radius(Vec3::new(6.0, 8.0, 0.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_keeps_anchor_height() {
        let solution = orbit_pose(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 50.0),
            BILLBOARD_FORWARD,
            &BillboardPose::default(),
        );
        assert!((solution.pose.position - Vec3::new(0.0, 1.0, 3.0)).length() < EPSILON);
    }

    #[test]
    fn test_viewer_overhead_keeps_previous_direction() {
        let previous = Vec3::new(0.0, -1.0, 0.0);
        let solution = orbit_pose(
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 9.0),
            previous,
            &BillboardPose::default(),
        );
        assert_eq!(solution.direction, previous);
        assert!((solution.pose.position - Vec3::new(0.0, -2.0, 0.0)).length() < EPSILON);
        assert!(solution.pose.position.is_finite());
    }

    #[test]
    fn test_rotation_points_front_at_viewer() {
        let eye = Vec3::new(10.0, 0.0, 2.0);
        let solution = orbit_pose(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            eye,
            BILLBOARD_FORWARD,
            &BillboardPose::default(),
        );
        let front = solution.pose.rotation * BILLBOARD_FORWARD;
        let expected = (eye - solution.pose.position).normalize();
        assert!((front - expected).length() < 1e-4);
    }
}
