//! Party session configuration resource.
//!
//! Manages session settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [session]
//! role = host
//! tick_rate = 60
//!
//! [ui]
//! instruction_seconds = 3.0
//! result_seconds = 5.0
//! kill_feed_seconds = 4.0
//! kill_feed_max_entries = 5
//!
//! [network]
//! latency_frames = 6
//! jitter_frames = 2
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_INSTRUCTION_SECONDS: f64 = 3.0;
const DEFAULT_RESULT_SECONDS: f64 = 5.0;
const DEFAULT_KILL_FEED_SECONDS: f32 = 4.0;
const DEFAULT_KILL_FEED_MAX_ENTRIES: usize = 5;
const DEFAULT_LATENCY_FRAMES: u32 = 6;
const DEFAULT_JITTER_FRAMES: u32 = 2;
const DEFAULT_CONFIG_PATH: &str = "./party.ini";

/// Which side of the session this process plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetRole {
    /// Owns the synchronized clock and arms countdowns.
    #[default]
    Host,
    /// Mirrors the host's countdowns.
    Client,
}

impl NetRole {
    pub fn parse(text: &str) -> Option<NetRole> {
        match text.trim().to_ascii_lowercase().as_str() {
            "host" => Some(NetRole::Host),
            "client" => Some(NetRole::Client),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetRole::Host => "host",
            NetRole::Client => "client",
        }
    }
}

/// Party session configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct PartyConfig {
    /// Session role of this process.
    pub role: NetRole,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Lifetime of an instruction popup.
    pub instruction_seconds: f64,
    /// Lifetime of the round result banner.
    pub result_seconds: f64,
    /// Lifetime of a kill-feed row.
    pub kill_feed_seconds: f32,
    /// Maximum visible kill-feed rows.
    pub kill_feed_max_entries: usize,
    /// Simulated one-way latency, in frames.
    pub latency_frames: u32,
    /// Simulated random extra latency, in frames.
    pub jitter_frames: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            role: NetRole::Host,
            tick_rate: DEFAULT_TICK_RATE,
            instruction_seconds: DEFAULT_INSTRUCTION_SECONDS,
            result_seconds: DEFAULT_RESULT_SECONDS,
            kill_feed_seconds: DEFAULT_KILL_FEED_SECONDS,
            kill_feed_max_entries: DEFAULT_KILL_FEED_MAX_ENTRIES,
            latency_frames: DEFAULT_LATENCY_FRAMES,
            jitter_frames: DEFAULT_JITTER_FRAMES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per simulation tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [session] section
        if let Some(role) = config.get("session", "role") {
            match NetRole::parse(&role) {
                Some(role) => self.role = role,
                None => warn!("Unknown session role '{}', keeping {}", role, self.role.as_str()),
            }
        }
        if let Some(rate) = config.getuint("session", "tick_rate").ok().flatten() {
            self.tick_rate = (rate as u32).max(1);
        }

        // [ui] section
        if let Some(secs) = config.getfloat("ui", "instruction_seconds").ok().flatten() {
            self.instruction_seconds = secs;
        }
        if let Some(secs) = config.getfloat("ui", "result_seconds").ok().flatten() {
            self.result_seconds = secs;
        }
        if let Some(secs) = config.getfloat("ui", "kill_feed_seconds").ok().flatten() {
            self.kill_feed_seconds = secs as f32;
        }
        if let Some(max) = config.getuint("ui", "kill_feed_max_entries").ok().flatten() {
            self.kill_feed_max_entries = (max as usize).max(1);
        }

        // [network] section
        if let Some(frames) = config.getuint("network", "latency_frames").ok().flatten() {
            self.latency_frames = frames as u32;
        }
        if let Some(frames) = config.getuint("network", "jitter_frames").ok().flatten() {
            self.jitter_frames = frames as u32;
        }

        info!(
            "Loaded config: role={}, tick_rate={}, instruction={}s, result={}s, kill_feed={}s x{}, latency={}+{} frames",
            self.role.as_str(),
            self.tick_rate,
            self.instruction_seconds,
            self.result_seconds,
            self.kill_feed_seconds,
            self.kill_feed_max_entries,
            self.latency_frames,
            self.jitter_frames
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [session] section
        config.set("session", "role", Some(self.role.as_str().to_string()));
        config.set("session", "tick_rate", Some(self.tick_rate.to_string()));

        // [ui] section
        config.set("ui", "instruction_seconds", Some(self.instruction_seconds.to_string()));
        config.set("ui", "result_seconds", Some(self.result_seconds.to_string()));
        config.set("ui", "kill_feed_seconds", Some(self.kill_feed_seconds.to_string()));
        config.set(
            "ui",
            "kill_feed_max_entries",
            Some(self.kill_feed_max_entries.to_string()),
        );

        // [network] section
        config.set("network", "latency_frames", Some(self.latency_frames.to_string()));
        config.set("network", "jitter_frames", Some(self.jitter_frames.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
