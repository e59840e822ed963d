//! Integration tests for orbiting billboards.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test billboard_integration
//! ```

use bevy_ecs::prelude::*;
use glam::Vec3;

use partycore::components::billboard::{BILLBOARD_FORWARD, BillboardPose, OrbitingBillboard};
use partycore::components::worldbounds::WorldBounds;
use partycore::resources::viewer::Viewer;
use partycore::systems::billboard::orbiting_billboard_system;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn tick_billboards(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(orbiting_billboard_system);
    schedule.run(world);
}

/// Anchor at the origin whose size has magnitude 10 (radius 5).
fn spawn_anchor(world: &mut World, center: Vec3) -> Entity {
    world
        .spawn(WorldBounds::new(center, Vec3::new(6.0, 8.0, 0.0)))
        .id()
}

fn pose(world: &World, billboard: Entity) -> BillboardPose {
    *world.get::<BillboardPose>(billboard).unwrap()
}

#[test]
fn billboard_sits_on_rim_toward_viewer() {
    let mut world = World::new();
    world.insert_resource(Viewer::at(Vec3::new(5.0, 0.0, 2.0)));
    let anchor = spawn_anchor(&mut world, Vec3::ZERO);
    let billboard = world.spawn(OrbitingBillboard::new(anchor)).id();

    tick_billboards(&mut world);

    let pose = pose(&world, billboard);
    assert!(approx_vec(pose.position, Vec3::new(5.0, 0.0, 0.0)));
    assert!(approx_eq(pose.forward.length(), 1.0));
    assert!(approx_vec(pose.forward, Vec3::Z));
    assert!(approx_vec(pose.rotation * BILLBOARD_FORWARD, pose.forward));
}

#[test]
fn billboard_follows_moving_anchor_without_drift() {
    let mut world = World::new();
    world.insert_resource(Viewer::at(Vec3::new(0.0, 20.0, 0.0)));
    let anchor = spawn_anchor(&mut world, Vec3::ZERO);
    let billboard = world.spawn(OrbitingBillboard::new(anchor)).id();

    for step in 1..=5 {
        let center = Vec3::new(step as f32, 0.0, 1.0);
        world.get_mut::<WorldBounds>(anchor).unwrap().center = center;
        tick_billboards(&mut world);
        let pose = pose(&world, billboard);
        assert!(approx_eq(pose.position.z, 1.0));
        assert!(approx_eq(pose.position.distance(Vec3::new(center.x, center.y, 1.0)), 5.0));
    }
}

#[test]
fn viewer_overhead_keeps_last_direction() {
    let mut world = World::new();
    world.insert_resource(Viewer::at(Vec3::new(0.0, -10.0, 0.0)));
    let anchor = spawn_anchor(&mut world, Vec3::ZERO);
    let billboard = world.spawn(OrbitingBillboard::new(anchor)).id();
    tick_billboards(&mut world);
    assert!(approx_vec(pose(&world, billboard).position, Vec3::new(0.0, -5.0, 0.0)));

    world.resource_mut::<Viewer>().set(Vec3::new(0.0, 0.0, 30.0));
    tick_billboards(&mut world);

    let pose = pose(&world, billboard);
    assert!(approx_vec(pose.position, Vec3::new(0.0, -5.0, 0.0)));
    assert!(pose.position.is_finite());
    assert!(pose.rotation.is_finite());
}

#[test]
fn missing_viewer_keeps_pose() {
    let mut world = World::new();
    world.insert_resource(Viewer::at(Vec3::new(5.0, 0.0, 0.0)));
    let anchor = spawn_anchor(&mut world, Vec3::ZERO);
    let billboard = world.spawn(OrbitingBillboard::new(anchor)).id();
    tick_billboards(&mut world);
    let before = pose(&world, billboard);

    world.resource_mut::<Viewer>().clear();
    world.get_mut::<WorldBounds>(anchor).unwrap().center = Vec3::new(3.0, 3.0, 3.0);
    tick_billboards(&mut world);
    assert_eq!(pose(&world, billboard), before);

    world.remove_resource::<Viewer>();
    tick_billboards(&mut world);
    assert_eq!(pose(&world, billboard), before);
}

#[test]
fn despawned_anchor_keeps_pose() {
    let mut world = World::new();
    world.insert_resource(Viewer::at(Vec3::new(5.0, 0.0, 0.0)));
    let anchor = spawn_anchor(&mut world, Vec3::ZERO);
    let billboard = world.spawn(OrbitingBillboard::new(anchor)).id();
    tick_billboards(&mut world);
    let before = pose(&world, billboard);

    world.despawn(anchor);
    world.resource_mut::<Viewer>().set(Vec3::new(-5.0, 0.0, 0.0));
    tick_billboards(&mut world);
    assert_eq!(pose(&world, billboard), before);
}
