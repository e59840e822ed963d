//! Countdown replication systems.
//!
//! - [`replicate_to_clients`] (host) – sends a clock sample every frame and an
//!   update for every changed [`NetworkedCountdown`] carrying a [`NetId`]
//! - [`receive_replication`] (client) – drains the link, resyncs the clock and
//!   keeps the newest update per [`NetId`]
//! - [`apply_replicated_countdowns`] (client) – copies the authoritative value
//!   onto local mirrors, including mirrors spawned after the update arrived
//! - [`forget_replica_observer`] (client) – releases the stored value when a
//!   mirror loses its [`NetId`]
//!
//! The client never re-arms from a duration: it copies the host's
//! `(enabled, expires_at)` pair as is.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::countdown::NetworkedCountdown;
use crate::components::netid::NetId;
use crate::resources::replication::{
    CountdownUpdate, ReplicatedCountdowns, ReplicationClient, ReplicationHost, WireFrame,
    decode_frame,
};
use crate::resources::syncclock::SyncClock;

/// Host: publish the clock and every changed replicated countdown.
pub fn replicate_to_clients(
    mut host: ResMut<ReplicationHost>,
    clock: Res<SyncClock>,
    changed: Query<(&NetId, &NetworkedCountdown), Changed<NetworkedCountdown>>,
) {
    if let Err(e) = host.send(&WireFrame::Clock { now: clock.now() }) {
        warn!("{}", e);
    }
    for (net_id, countdown) in changed.iter() {
        let update = CountdownUpdate {
            net_id: *net_id,
            seq: host.next_seq(),
            countdown: *countdown,
        };
        if let Err(e) = host.send(&WireFrame::Countdown(update)) {
            warn!("{}", e);
        }
    }
}

/// Client: drain the link into the clock and the latest-value table.
pub fn receive_replication(
    client: Res<ReplicationClient>,
    mut clock: ResMut<SyncClock>,
    mut latest: ResMut<ReplicatedCountdowns>,
) {
    for text in client.rx.try_iter() {
        match decode_frame(&text) {
            Ok(WireFrame::Clock { now }) => {
                clock.resync(now);
            }
            Ok(WireFrame::Countdown(update)) => {
                latest.accept(update);
            }
            Err(e) => warn!("{}", e),
        }
    }
}

/// Client: write the authoritative countdown onto each mirror.
///
/// Only differing values are written, so change detection stays quiet for
/// mirrors that are already up to date.
pub fn apply_replicated_countdowns(
    latest: Res<ReplicatedCountdowns>,
    mut mirrors: Query<(&NetId, &mut NetworkedCountdown)>,
) {
    for (net_id, mut countdown) in mirrors.iter_mut() {
        if let Some(value) = latest.get(*net_id) {
            countdown.set_if_neq(value);
        }
    }
}

/// Client: drop the stored value once its mirror is gone.
///
/// Fires for every removal of [`NetId`], so expiry, slot replacement and
/// manual despawns all release their entry.
pub fn forget_replica_observer(
    trigger: On<Remove, NetId>,
    net_ids: Query<&NetId>,
    latest: Option<ResMut<ReplicatedCountdowns>>,
) {
    let (Some(mut latest), Ok(net_id)) = (latest, net_ids.get(trigger.event().entity)) else {
        return;
    };
    latest.forget(*net_id);
}
