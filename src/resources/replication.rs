//! Value replication link between the authoritative host and a client.
//!
//! The transport itself is not ours to build; this module models it as a pair
//! of `crossbeam_channel` endpoints carrying JSON text frames:
//!
//! - [`WireFrame::Clock`] – a host clock sample
//! - [`WireFrame::Countdown`] – the latest `(enabled, expires_at)` pair of one
//!   replicated countdown, with a per-host sequence number
//!
//! Delivery is assumed eventually consistent. The client keeps, per
//! [`NetId`], only the update with the highest sequence number
//! ([`ReplicatedCountdowns`]), so reordered or duplicated frames are harmless.
//!
//! [`LatencyRelay`] sits between the two endpoints to delay and reorder frames
//! for local sessions and tests.
//!
//! # Related
//!
//! - [`crate::systems::replication`] – host send and client receive/apply systems

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::countdown::NetworkedCountdown;
use crate::components::netid::NetId;
use crate::resources::syncclock::SyncTimestamp;

/// Authoritative countdown value for one replicated entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownUpdate {
    pub net_id: NetId,
    /// Host-wide send order; later updates carry larger values.
    pub seq: u64,
    pub countdown: NetworkedCountdown,
}

/// One message on the replication link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireFrame {
    Clock { now: SyncTimestamp },
    Countdown(CountdownUpdate),
}

/// Encode a frame as JSON text.
pub fn encode_frame(frame: &WireFrame) -> Result<String, String> {
    serde_json::to_string(frame).map_err(|e| format!("Failed to encode frame: {}", e))
}

/// Decode a JSON text frame.
pub fn decode_frame(text: &str) -> Result<WireFrame, String> {
    serde_json::from_str(text).map_err(|e| format!("Failed to decode frame: {}", e))
}

/// Host end of the link.
#[derive(Resource)]
pub struct ReplicationHost {
    /// Sender for encoded frames (host -> client).
    pub tx: Sender<String>,
    next_seq: u64,
}

impl ReplicationHost {
    pub fn new(tx: Sender<String>) -> Self {
        ReplicationHost { tx, next_seq: 0 }
    }

    /// Hand out the next sequence number.
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Encode and send a frame. A closed link is not an error: the client may
    /// have left.
    pub fn send(&self, frame: &WireFrame) -> Result<(), String> {
        let text = encode_frame(frame)?;
        if self.tx.send(text).is_err() {
            debug!("Replication link closed, dropping {:?}", frame);
        }
        Ok(())
    }
}

/// Client end of the link.
#[derive(Resource)]
pub struct ReplicationClient {
    /// Receiver for encoded frames (host -> client).
    pub rx: Receiver<String>,
}

impl ReplicationClient {
    pub fn new(rx: Receiver<String>) -> Self {
        ReplicationClient { rx }
    }
}

/// Create a directly connected host/client pair.
pub fn replication_link() -> (ReplicationHost, ReplicationClient) {
    let (tx, rx) = unbounded::<String>();
    (ReplicationHost::new(tx), ReplicationClient::new(rx))
}

/// Latest authoritative countdown per [`NetId`], as seen by a client.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReplicatedCountdowns {
    pub latest: FxHashMap<NetId, CountdownUpdate>,
}

impl ReplicatedCountdowns {
    /// Keep `update` unless a newer one for the same id is already known.
    ///
    /// Returns `true` if the update was kept.
    pub fn accept(&mut self, update: CountdownUpdate) -> bool {
        match self.latest.get(&update.net_id) {
            Some(known) if known.seq >= update.seq => false,
            _ => {
                self.latest.insert(update.net_id, update);
                true
            }
        }
    }

    pub fn get(&self, net_id: NetId) -> Option<NetworkedCountdown> {
        self.latest.get(&net_id).map(|u| u.countdown)
    }

    /// Forget a replicated entity.
    pub fn forget(&mut self, net_id: NetId) {
        self.latest.remove(&net_id);
    }
}

/// Delays frames by a fixed number of pumps, plus optional random jitter.
///
/// With jitter, frames can be released out of order.
pub struct LatencyRelay {
    inbound: Receiver<String>,
    outbound: Sender<String>,
    delay_frames: u32,
    jitter_frames: u32,
    rng: fastrand::Rng,
    frame: u64,
    pending: VecDeque<(u64, String)>,
}

impl LatencyRelay {
    pub fn new(inbound: Receiver<String>, outbound: Sender<String>, delay_frames: u32) -> Self {
        LatencyRelay {
            inbound,
            outbound,
            delay_frames,
            jitter_frames: 0,
            rng: fastrand::Rng::with_seed(0),
            frame: 0,
            pending: VecDeque::new(),
        }
    }

    /// Builder: add up to `jitter_frames` of random extra delay per frame.
    pub fn with_jitter(mut self, jitter_frames: u32, seed: u64) -> Self {
        self.jitter_frames = jitter_frames;
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Advance one frame: accept new frames and release the due ones.
    ///
    /// Returns the number of frames delivered. Due frames for a closed client
    /// link are dropped and not counted.
    pub fn pump(&mut self) -> usize {
        self.frame += 1;
        for text in self.inbound.try_iter() {
            let jitter = if self.jitter_frames > 0 {
                self.rng.u32(0..=self.jitter_frames)
            } else {
                0
            };
            let due = self.frame + (self.delay_frames + jitter) as u64;
            self.pending.push_back((due, text));
        }
        let mut released = 0;
        let frame = self.frame;
        let mut kept = VecDeque::with_capacity(self.pending.len());
        for (due, text) in self.pending.drain(..) {
            if due <= frame {
                if self.outbound.send(text).is_ok() {
                    released += 1;
                } else {
                    debug!("Replication client gone, dropping relayed frame");
                }
            } else {
                kept.push_back((due, text));
            }
        }
        self.pending = kept;
        released
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

/// Create a host/client pair with a [`LatencyRelay`] in between.
pub fn delayed_replication_link(
    delay_frames: u32,
) -> (ReplicationHost, LatencyRelay, ReplicationClient) {
    let (host_tx, relay_rx) = unbounded::<String>();
    let (relay_tx, client_rx) = unbounded::<String>();
    (
        ReplicationHost::new(host_tx),
        LatencyRelay::new(relay_rx, relay_tx, delay_frames),
        ReplicationClient::new(client_rx),
    )
}
