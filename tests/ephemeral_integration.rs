//! Integration tests for self-expiring elements, slot replacement and the
//! kill feed.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test ephemeral_integration
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use partycore::components::countdown::NetworkedCountdown;
use partycore::components::ephemeral::Ephemeral;
use partycore::components::localcountdown::LocalCountdown;
use partycore::components::widgets::{InstructionPopup, KillFeedEntry};
use partycore::events::ephemeral::ElementExpiredEvent;
use partycore::resources::elementslots::{ElementSlots, INSTRUCTION_SLOT};
use partycore::resources::killfeed::KillFeed;
use partycore::resources::syncclock::SyncClock;
use partycore::resources::worldtime::WorldTime;
use partycore::systems::ephemeral::{
    ephemeral_expiry_system, local_countdown_system, show_in_slot, show_in_slot_world,
};
use partycore::systems::killfeed::{kill_feed_expired_observer, push_kill_feed};
use partycore::systems::time::{advance_sync_clock, update_world_time};

const DT: f32 = 0.5;

/// Texts of popups seen by the expiry observer, in order.
#[derive(Resource, Default)]
struct ExpiredLog(Vec<String>);

fn log_expired(
    trigger: On<ElementExpiredEvent>,
    popups: Query<&InstructionPopup>,
    mut log: ResMut<ExpiredLog>,
) {
    if let Ok(popup) = popups.get(trigger.event().entity) {
        log.0.push(popup.text.clone());
    }
}

fn make_world(time_scale: f32) -> (World, Schedule) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(time_scale));
    world.insert_resource(SyncClock::host());
    world.insert_resource(ElementSlots::new());
    world.insert_resource(KillFeed::new(3));
    world.init_resource::<ExpiredLog>();
    world.spawn(Observer::new(kill_feed_expired_observer));
    world.spawn(Observer::new(log_expired));

    let mut schedule = Schedule::default();
    schedule.add_systems(local_countdown_system);
    schedule.add_systems(ephemeral_expiry_system.after(local_countdown_system));
    (world, schedule)
}

fn tick(world: &mut World, schedule: &mut Schedule) {
    update_world_time(world, DT);
    advance_sync_clock(world, DT);
    schedule.run(world);
    world.clear_trackers();
}

fn popup(world: &mut World, text: &str, seconds: f64) -> Entity {
    let now = world.resource::<SyncClock>().now();
    world
        .spawn((InstructionPopup::new(text), Ephemeral::synced(now, seconds)))
        .id()
}

fn alive(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok()
}

fn push_row(world: &mut World, attacker: &str, seconds: f32) -> Entity {
    let mut state: SystemState<(Commands, ResMut<KillFeed>)> = SystemState::new(world);
    let (mut commands, mut feed) = state.get_mut(world);
    let row = push_kill_feed(
        &mut commands,
        &mut feed,
        KillFeedEntry::new(attacker, "victim"),
        seconds,
    );
    state.apply(world);
    row
}

// =============================================================================
// Synchronized lifetimes
// =============================================================================

#[test]
fn synced_element_lives_exactly_its_duration() {
    let (mut world, mut schedule) = make_world(1.0);
    let e = popup(&mut world, "Squat!", 2.0);

    for _ in 0..3 {
        tick(&mut world, &mut schedule);
        assert!(alive(&world, e));
    }
    tick(&mut world, &mut schedule); // t = 2.0
    assert!(!alive(&world, e));

    for _ in 0..4 {
        tick(&mut world, &mut schedule);
    }
    assert!(!alive(&world, e));
    assert_eq!(world.resource::<ExpiredLog>().0, vec!["Squat!".to_string()]);
}

#[test]
fn expiry_observer_still_sees_components() {
    let (mut world, mut schedule) = make_world(1.0);
    popup(&mut world, "Stand up!", 0.5);
    tick(&mut world, &mut schedule);
    assert_eq!(world.resource::<ExpiredLog>().0, vec!["Stand up!".to_string()]);
}

#[test]
fn synced_lifetime_ignores_time_scale() {
    let (mut world, mut schedule) = make_world(0.25);
    let e = popup(&mut world, "Squat!", 1.0);
    tick(&mut world, &mut schedule);
    assert!(alive(&world, e));
    tick(&mut world, &mut schedule);
    assert!(!alive(&world, e));
}

#[test]
fn zero_length_countdown_survives_arming_frame() {
    let (mut world, mut schedule) = make_world(1.0);
    let now = world.resource::<SyncClock>().now();
    let countdown = NetworkedCountdown::arm(now, 0.0);
    assert!(!countdown.is_complete(now));

    let e = world.spawn((Ephemeral, countdown)).id();
    tick(&mut world, &mut schedule);
    assert!(!alive(&world, e));
}

#[test]
fn non_positive_lifetime_is_not_armed() {
    let (mut world, mut schedule) = make_world(1.0);
    let synced = popup(&mut world, "forever", 0.0);
    let local = world.spawn(Ephemeral::local(-1.0)).id();

    for _ in 0..10 {
        tick(&mut world, &mut schedule);
    }
    assert!(alive(&world, synced));
    assert!(alive(&world, local));
    assert!(!world.get::<NetworkedCountdown>(synced).unwrap().is_enabled());
    assert_eq!(world.get::<LocalCountdown>(local).unwrap().remaining(), None);
}

#[test]
fn element_awaiting_host_lives_until_armed() {
    let (mut world, mut schedule) = make_world(1.0);
    let e = world
        .spawn((InstructionPopup::new("Squat!"), Ephemeral::awaiting_host()))
        .id();
    for _ in 0..6 {
        tick(&mut world, &mut schedule);
    }
    assert!(alive(&world, e));

    let now = world.resource::<SyncClock>().now();
    *world.get_mut::<NetworkedCountdown>(e).unwrap() = NetworkedCountdown::arm(now, 1.0);
    tick(&mut world, &mut schedule);
    assert!(alive(&world, e));
    tick(&mut world, &mut schedule);
    assert!(!alive(&world, e));
}

// =============================================================================
// Local lifetimes
// =============================================================================

#[test]
fn local_element_follows_scaled_time() {
    let (mut world, mut schedule) = make_world(0.5);
    let e = world.spawn(Ephemeral::local(1.0)).id();

    for _ in 0..3 {
        tick(&mut world, &mut schedule);
        assert!(alive(&world, e));
    }
    tick(&mut world, &mut schedule); // scaled elapsed = 1.0
    assert!(!alive(&world, e));
}

#[test]
fn despawned_child_goes_with_expired_parent() {
    let (mut world, mut schedule) = make_world(1.0);
    let parent = world.spawn(Ephemeral::local(0.5)).id();
    let child = world.spawn(ChildOf(parent)).id();
    tick(&mut world, &mut schedule);
    assert!(!alive(&world, parent));
    assert!(!alive(&world, child));
}

// =============================================================================
// Slots
// =============================================================================

#[test]
fn showing_in_slot_destroys_previous_element() {
    let (mut world, mut schedule) = make_world(1.0);
    let now = world.resource::<SyncClock>().now();
    let first = show_in_slot_world(
        &mut world,
        INSTRUCTION_SLOT,
        (InstructionPopup::new("Get ready!"), Ephemeral::synced(now, 3.0)),
    );
    tick(&mut world, &mut schedule);

    let now = world.resource::<SyncClock>().now();
    let second = show_in_slot_world(
        &mut world,
        INSTRUCTION_SLOT,
        (InstructionPopup::new("Squat!"), Ephemeral::synced(now, 1.0)),
    );
    assert!(!alive(&world, first));
    assert_eq!(
        world.resource::<ElementSlots>().current(INSTRUCTION_SLOT),
        Some(second)
    );

    tick(&mut world, &mut schedule);
    assert!(alive(&world, second));
    tick(&mut world, &mut schedule);
    assert!(!alive(&world, second));
    assert_eq!(world.resource::<ElementSlots>().current(INSTRUCTION_SLOT), None);
    // The replaced element was destroyed, not expired.
    assert_eq!(world.resource::<ExpiredLog>().0, vec!["Squat!".to_string()]);
}

#[test]
fn slot_replacement_from_commands() {
    let (mut world, _schedule) = make_world(1.0);
    let mut state: SystemState<(Commands, ResMut<ElementSlots>)> = SystemState::new(&mut world);

    let (mut commands, mut slots) = state.get_mut(&mut world);
    let first = show_in_slot(
        &mut commands,
        &mut slots,
        INSTRUCTION_SLOT,
        InstructionPopup::new("a"),
    );
    state.apply(&mut world);

    let (mut commands, mut slots) = state.get_mut(&mut world);
    let second = show_in_slot(
        &mut commands,
        &mut slots,
        INSTRUCTION_SLOT,
        InstructionPopup::new("b"),
    );
    state.apply(&mut world);

    assert!(!alive(&world, first));
    assert!(alive(&world, second));
    assert_eq!(
        world.resource::<ElementSlots>().current(INSTRUCTION_SLOT),
        Some(second)
    );
}

// =============================================================================
// Kill feed
// =============================================================================

#[test]
fn kill_feed_evicts_oldest_when_full() {
    let (mut world, _schedule) = make_world(1.0);
    let rows: Vec<Entity> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| push_row(&mut world, name, 10.0))
        .collect();

    assert!(!alive(&world, rows[0]));
    let feed = world.resource::<KillFeed>();
    assert_eq!(feed.len(), 3);
    assert_eq!(
        feed.entries.iter().copied().collect::<Vec<_>>(),
        rows[1..].to_vec()
    );
}

#[test]
fn kill_feed_rows_expire_and_leave_feed() {
    let (mut world, mut schedule) = make_world(1.0);
    let first = push_row(&mut world, "a", 1.0);
    tick(&mut world, &mut schedule);
    let second = push_row(&mut world, "b", 1.0);

    tick(&mut world, &mut schedule);
    assert!(!alive(&world, first));
    assert!(alive(&world, second));
    assert_eq!(world.resource::<KillFeed>().len(), 1);

    tick(&mut world, &mut schedule);
    assert!(!alive(&world, second));
    assert!(world.resource::<KillFeed>().is_empty());
}
