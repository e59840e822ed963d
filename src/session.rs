//! Headless party session setup.
//!
//! Builds one ECS world per participant with its resources, observers, scene
//! entities and update schedule, and drives it frame by frame.
//!
//! # Scene
//!
//! - a [`UiRoot`] that parents transient widgets
//! - four [`Player`] avatars, each with an orbiting [`PlayerLabel`]
//! - the [`RoundTimer`] entity with the round's networked countdown
//! - the reload-scoped [`PartyHud`] and [`Scoreboard`] singletons
//!
//! # Frame
//!
//! [`tick`] advances [`WorldTime`] and [`SyncClock`], runs the schedule and
//! clears change trackers. Within the schedule, singleton lifecycles run
//! first, then replication input, then the round script, then countdowns,
//! expiry and presentation.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::billboard::OrbitingBillboard;
use crate::components::countdown::NetworkedCountdown;
use crate::components::party::{PartyHud, Player, ReloadScoped, RoundTimer, Scoreboard, UiRoot};
use crate::components::widgets::PlayerLabel;
use crate::components::worldbounds::WorldBounds;
use crate::events::singleton::singleton_changed_observer;
use crate::resources::elementslots::ElementSlots;
use crate::resources::killfeed::KillFeed;
use crate::resources::partyconfig::{NetRole, PartyConfig};
use crate::resources::replication::{ReplicatedCountdowns, ReplicationClient, ReplicationHost};
use crate::resources::roundscript::{ROUND_TIMER_NET_ID, RoundScript};
use crate::resources::sessionstats::{SessionStats, count_expired_observer};
use crate::resources::singletons::SingletonRegistry;
use crate::resources::syncclock::SyncClock;
use crate::resources::viewer::Viewer;
use crate::resources::worldtime::WorldTime;
use crate::systems::billboard::orbiting_billboard_system;
use crate::systems::ephemeral::{ephemeral_expiry_system, local_countdown_system};
use crate::systems::killfeed::kill_feed_expired_observer;
use crate::systems::party::{hud_timer_system, player_motion_system, round_script_system};
use crate::systems::reload::{capture_reload_state, restore_reload_state_from_json};
use crate::systems::replication::{
    apply_replicated_countdowns, forget_replica_observer, receive_replication,
    replicate_to_clients,
};
use crate::systems::singletons::{SingletonLifecycle, register_singleton};
use crate::systems::time::{advance_sync_clock, update_world_time};

/// Player names in seat order.
pub const PLAYER_NAMES: [&str; 4] = ["Ana", "Bo", "Cy", "Dee"];

/// Default eye position of the local viewer.
pub const VIEWER_EYE: Vec3 = Vec3::new(0.0, -14.0, 8.0);

/// One participant's world and its update schedule.
pub struct PartySession {
    pub world: World,
    pub update: Schedule,
}

impl PartySession {
    /// Build a session world for `config.role` running `script`.
    ///
    /// The caller inserts [`ReplicationHost`] or [`ReplicationClient`]; the
    /// replication systems stay idle until it does.
    pub fn new(config: PartyConfig, script: RoundScript) -> Self {
        let mut world = setup_world(config, script);
        let update = build_update_schedule(&mut world);
        PartySession { world, update }
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.world, &mut self.update, dt);
    }
}

/// Create a world with the session resources, observers and scene.
pub fn setup_world(config: PartyConfig, script: RoundScript) -> World {
    let mut world = World::new();
    let role = config.role;

    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(match role {
        NetRole::Host => SyncClock::host(),
        NetRole::Client => SyncClock::client(),
    });
    world.insert_resource(KillFeed::new(config.kill_feed_max_entries));
    world.insert_resource(ElementSlots::new());
    world.insert_resource(ReplicatedCountdowns::default());
    world.insert_resource(SessionStats::default());
    world.insert_resource(Viewer::at(VIEWER_EYE));
    world.insert_resource(SingletonRegistry::new());

    world.spawn(Observer::new(kill_feed_expired_observer));
    world.spawn(Observer::new(count_expired_observer));
    world.spawn(Observer::new(singleton_changed_observer));
    world.spawn(Observer::new(forget_replica_observer));

    world.spawn(UiRoot);
    for (seat, name) in PLAYER_NAMES.iter().enumerate() {
        spawn_player(&mut world, name, seat);
    }

    let timer = match role {
        NetRole::Host => {
            let now = world.resource::<SyncClock>().now();
            NetworkedCountdown::from_duration(now, script.round_seconds)
        }
        NetRole::Client => NetworkedCountdown::disabled(),
    };
    world.spawn((RoundTimer, ROUND_TIMER_NET_ID, timer));

    spawn_reload_scoped(&mut world);

    info!("Session world ready ({})", role.as_str());
    world.insert_resource(script);
    world.insert_resource(config);
    world
}

/// Spawn a player avatar and its orbiting name label.
pub fn spawn_player(world: &mut World, name: &str, seat: usize) -> Entity {
    let player = world
        .spawn((
            Player {
                name: name.to_string(),
                seat,
            },
            WorldBounds::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 2.0)),
        ))
        .id();
    world.spawn((
        PlayerLabel::new(name),
        OrbitingBillboard::new(player),
        ChildOf(player),
    ));
    player
}

/// Spawn the entities a code reload tears down and recreates.
pub fn spawn_reload_scoped(world: &mut World) {
    world.spawn((PartyHud::default(), ReloadScoped));
    world.spawn((Scoreboard::default(), ReloadScoped));
}

/// Build the per-frame update schedule and register the singleton types.
pub fn build_update_schedule(world: &mut World) -> Schedule {
    let mut update = Schedule::default();
    register_singleton::<PartyHud>(world, &mut update);
    register_singleton::<Scoreboard>(world, &mut update);

    update.add_systems(
        (receive_replication, apply_replicated_countdowns)
            .chain()
            .run_if(resource_exists::<ReplicationClient>)
            .after(SingletonLifecycle),
    );
    update.add_systems(round_script_system.after(SingletonLifecycle));
    update.add_systems(local_countdown_system);
    update.add_systems(
        ephemeral_expiry_system
            .after(local_countdown_system)
            .after(apply_replicated_countdowns)
            .after(round_script_system),
    );
    update.add_systems(
        replicate_to_clients
            .run_if(resource_exists::<ReplicationHost>)
            .after(round_script_system),
    );
    update.add_systems(hud_timer_system.after(apply_replicated_countdowns));
    update.add_systems(player_motion_system);
    update.add_systems(orbiting_billboard_system.after(player_motion_system));

    if let Err(e) = update.initialize(world) {
        warn!("Failed to initialize update schedule: {}", e);
    }
    update
}

/// Run one frame on `world`.
pub fn tick(world: &mut World, update: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    advance_sync_clock(world, dt);
    update.run(world);
    world.clear_trackers(); // Clear changed components for next frame
}

/// Tear down and recreate the reload-scoped entities, keeping singleton state.
///
/// Captures the reload bag and passes it through its JSON form, despawns every
/// [`ReloadScoped`] entity, starts a fresh [`SingletonRegistry`], respawns the
/// scoped entities and restores. Removal notifications for the old instances
/// arrive on the next frame and are ignored by the registry's identity check.
pub fn simulate_hot_reload(world: &mut World) {
    let bag = capture_reload_state(world);
    let text = match bag.to_json() {
        Ok(text) => text,
        Err(e) => {
            warn!("Reload state not serialized: {}", e);
            String::new()
        }
    };

    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, With<ReloadScoped>>()
        .iter(world)
        .collect();
    for entity in doomed {
        world.despawn(entity);
    }

    world.insert_resource(SingletonRegistry::new());
    spawn_reload_scoped(world);
    restore_reload_state_from_json(world, &text);

    if let Some(mut stats) = world.get_resource_mut::<SessionStats>() {
        stats.reloads += 1;
    }
    info!("Hot reload done ({} singleton records)", bag.len());
}
