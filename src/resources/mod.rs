//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: clocks, registries, replication
//! endpoints and configuration. Each submodule documents the semantics and
//! intended usage of its resource(s).
//!
//! Overview
//! - `elementslots` – exclusive UI slots and the element showing in each
//! - `killfeed` – ordered, capped list of live kill-feed rows
//! - `partyconfig` – INI-backed session configuration
//! - `reloadstate` – serializable state carried across a code reload
//! - `replication` – wire frames, host/client endpoints and the latency relay
//! - `roundscript` – timeline of the current round
//! - `sessionstats` – per-world counters
//! - `singletons` – active instance per singleton type
//! - `syncclock` – host-authoritative synchronized time
//! - `viewer` – local camera eye position
//! - `worldtime` – local simulation time and delta
pub mod elementslots;
pub mod killfeed;
pub mod partyconfig;
pub mod reloadstate;
pub mod replication;
pub mod roundscript;
pub mod sessionstats;
pub mod singletons;
pub mod syncclock;
pub mod viewer;
pub mod worldtime;
