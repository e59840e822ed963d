//! Partycore main entry point.
//!
//! Runs a headless party round with one host world and one client world
//! joined by an in-process replication link with simulated latency.
//!
//! # Main Loop
//!
//! 1. Load `party.ini` (or the `--config` path), falling back to defaults
//! 2. Build the host and client sessions and the latency relay between them
//! 3. Each frame:
//!    - tick the host, which publishes its clock and changed countdowns
//!    - pump the relay, releasing frames whose delay has elapsed
//!    - tick the client, which mirrors the host's countdowns
//!    - at `--reload-at`, simulate a code reload on both worlds
//! 4. Log each world's totals
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 1200 --reload-at 300
//! ```

use clap::Parser;
use log::info;
use std::path::PathBuf;

use partycore::resources::elementslots::{ElementSlots, INSTRUCTION_SLOT, RESULT_SLOT};
use partycore::resources::killfeed::KillFeed;
use partycore::resources::partyconfig::{NetRole, PartyConfig};
use partycore::resources::replication::delayed_replication_link;
use partycore::resources::roundscript::RoundScript;
use partycore::resources::sessionstats::SessionStats;
use partycore::resources::syncclock::SyncClock;
use partycore::session::{PartySession, simulate_hot_reload};

/// Seed of the relay's jitter generator, fixed so runs are reproducible.
const JITTER_SEED: u64 = 0x5eed;

/// Headless party session runner
#[derive(Parser)]
#[command(version, about = "Runs a headless host/client party round.")]
struct Cli {
    /// Configuration file (default: ./party.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1200)]
    frames: u32,

    /// Simulate a code reload on this frame.
    #[arg(long, value_name = "FRAME")]
    reload_at: Option<u32>,

    /// Override the configured one-way latency, in frames.
    #[arg(long, value_name = "FRAMES")]
    latency_frames: Option<u32>,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn log_summary(label: &str, session: &PartySession) {
    let world = &session.world;
    let stats = world.resource::<SessionStats>();
    let slots = world.resource::<ElementSlots>();
    info!(
        "[{}] t={:.2}s popups={} kills={} expired={} reloads={} feed_rows={} instruction={:?} result={:?}",
        label,
        world.resource::<SyncClock>().now().seconds(),
        stats.popups_shown,
        stats.kills,
        stats.elements_expired,
        stats.reloads,
        world.resource::<KillFeed>().len(),
        slots.current(INSTRUCTION_SLOT),
        slots.current(RESULT_SLOT),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => PartyConfig::with_path(path),
        None => PartyConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        info!("{}, using defaults", e);
    }
    if let Some(frames) = cli.latency_frames {
        config.latency_frames = frames;
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    info!("Starting party session, {} frames", cli.frames);
    let dt = config.tick_seconds();

    let (replication_host, relay, replication_client) =
        delayed_replication_link(config.latency_frames);
    let mut relay = relay.with_jitter(config.jitter_frames, JITTER_SEED);

    let mut host = PartySession::new(
        PartyConfig {
            role: NetRole::Host,
            ..config.clone()
        },
        RoundScript::squat_off(),
    );
    host.world.insert_resource(replication_host);

    let mut client = PartySession::new(
        PartyConfig {
            role: NetRole::Client,
            ..config
        },
        RoundScript::squat_off(),
    );
    client.world.insert_resource(replication_client);

    for frame in 1..=cli.frames {
        host.tick(dt);
        relay.pump();
        client.tick(dt);

        if cli.reload_at == Some(frame) {
            info!("Frame {}: simulating code reload", frame);
            simulate_hot_reload(&mut host.world);
            simulate_hot_reload(&mut client.world);
        }
    }

    if relay.in_flight() > 0 {
        info!("{} replication frames still in flight", relay.in_flight());
    }
    log_summary("host", &host);
    log_summary("client", &client);
}
