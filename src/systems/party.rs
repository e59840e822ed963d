//! Party round systems.
//!
//! - [`round_script_system`] – turns due [`RoundScript`] actions into widgets
//! - [`hud_timer_system`] – writes the round timer text onto the active HUD
//! - [`player_motion_system`] – moves player avatars and their bounds
//!
//! The HUD and the scoreboard are reached through the
//! [`SingletonRegistry`]; when a slot is empty (between a reload's teardown and
//! restore, or before the first activation) the dependent update is skipped.

use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::countdown::NetworkedCountdown;
use crate::components::ephemeral::Ephemeral;
use crate::components::party::{PartyHud, Player, RoundTimer, Scoreboard, UiRoot};
use crate::components::widgets::{
    InstructionPopup, KillFeedEntry, RoundResultBanner, countdown_label,
};
use crate::components::worldbounds::WorldBounds;
use crate::resources::elementslots::{ElementSlots, INSTRUCTION_SLOT, RESULT_SLOT};
use crate::resources::killfeed::KillFeed;
use crate::resources::partyconfig::PartyConfig;
use crate::resources::roundscript::{RoundAction, RoundScript};
use crate::resources::sessionstats::SessionStats;
use crate::resources::singletons::SingletonRegistry;
use crate::resources::syncclock::SyncClock;
use crate::resources::worldtime::WorldTime;
use crate::systems::ephemeral::show_in_slot;
use crate::systems::killfeed::push_kill_feed;

/// Radius of the avatars' lap around the arena center.
const LAP_RADIUS: f32 = 6.0;
/// Angular speed of the lap, in turns per second.
const LAP_SPEED: f32 = 0.1;
/// Avatar bounds.
const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 1.0, 2.0);

/// Shared lifetime bundle: the host arms, clients wait for the host's value.
fn synced_lifetime(clock: &SyncClock, seconds: f64) -> (Ephemeral, NetworkedCountdown) {
    if clock.is_authoritative() {
        Ephemeral::synced(clock.now(), seconds)
    } else {
        Ephemeral::awaiting_host()
    }
}

/// Spawn widgets for every round action that is due.
#[allow(clippy::too_many_arguments)]
pub fn round_script_system(
    clock: Res<SyncClock>,
    config: Res<PartyConfig>,
    registry: Res<SingletonRegistry>,
    mut script: ResMut<RoundScript>,
    mut slots: ResMut<ElementSlots>,
    mut feed: ResMut<KillFeed>,
    mut stats: ResMut<SessionStats>,
    mut scoreboards: Query<&mut Scoreboard>,
    ui_root: Query<Entity, With<UiRoot>>,
    mut commands: Commands,
) {
    let root = ui_root.iter().next();
    for action in script.take_due(clock.now()) {
        let widget = match action {
            RoundAction::Instruction(text) => {
                debug!("Instruction: {}", text);
                let net_id = script.alloc_net_id();
                stats.popups_shown += 1;
                show_in_slot(
                    &mut commands,
                    &mut slots,
                    INSTRUCTION_SLOT,
                    (
                        InstructionPopup::new(text),
                        net_id,
                        synced_lifetime(&clock, config.instruction_seconds),
                    ),
                )
            }
            RoundAction::Kill { attacker, victim } => {
                stats.kills += 1;
                if let Some(board) = registry.instance::<Scoreboard>() {
                    if let Ok(mut board) = scoreboards.get_mut(board) {
                        board.add_kill(&attacker);
                    }
                }
                push_kill_feed(
                    &mut commands,
                    &mut feed,
                    KillFeedEntry::new(attacker, victim),
                    config.kill_feed_seconds,
                )
            }
            RoundAction::Result => {
                let winner = registry
                    .instance::<Scoreboard>()
                    .and_then(|board| scoreboards.get(board).ok())
                    .and_then(|board| board.leader().map(str::to_string));
                let banner = RoundResultBanner::new(winner);
                info!("Round over: {}", banner.headline());
                let net_id = script.alloc_net_id();
                show_in_slot(
                    &mut commands,
                    &mut slots,
                    RESULT_SLOT,
                    (
                        banner,
                        net_id,
                        synced_lifetime(&clock, config.result_seconds),
                    ),
                )
            }
        };
        if let Some(root) = root {
            commands.entity(widget).insert(ChildOf(root));
        }
    }
}

/// Show the round timer's seconds left on the active HUD.
pub fn hud_timer_system(
    clock: Res<SyncClock>,
    registry: Res<SingletonRegistry>,
    timers: Query<&NetworkedCountdown, With<RoundTimer>>,
    mut huds: Query<&mut PartyHud>,
) {
    let Some(hud) = registry.instance::<PartyHud>() else {
        return;
    };
    let Ok(mut hud) = huds.get_mut(hud) else {
        return;
    };
    let text = match timers.iter().next() {
        Some(timer) if timer.is_enabled() => countdown_label(timer.remaining(clock.now())),
        _ => "--".to_string(),
    };
    if hud.timer_text != text {
        hud.timer_text = text;
    }
}

/// Move avatars around the arena and publish their bounds.
pub fn player_motion_system(
    world_time: Res<WorldTime>,
    mut players: Query<(&Player, &mut WorldBounds)>,
) {
    for (player, mut bounds) in players.iter_mut() {
        let phase = player.seat as f32 * 0.25;
        let angle = (world_time.elapsed * LAP_SPEED + phase) * TAU;
        bounds.center = Vec3::new(
            angle.cos() * LAP_RADIUS,
            angle.sin() * LAP_RADIUS,
            PLAYER_SIZE.z * 0.5,
        );
        bounds.size = PLAYER_SIZE;
    }
}
