//! State bag that survives a live code reload.
//!
//! Before a reload tears the world down, every registered singleton type
//! writes a [`SingletonReloadState`] into a [`ReloadStateBag`] under its
//! [`SingletonKey`](crate::resources::singletons::SingletonKey). After the
//! world is recreated the bag is handed back and each type restores its
//! registration from it.
//!
//! The bag crosses the reload as JSON text. It carries a format version; a bag
//! written by a different version is rejected and treated as empty by the
//! caller, which is the same as "nothing was active".

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::singletons::SingletonKey;

/// Format version written by [`ReloadStateBag::to_json`].
pub const RELOAD_STATE_VERSION: u32 = 1;

/// Per-type payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SingletonReloadState {
    pub was_active: bool,
}

/// String-keyed snapshot handed across the reload boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadStateBag {
    version: u32,
    singletons: FxHashMap<String, SingletonReloadState>,
}

impl Default for ReloadStateBag {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadStateBag {
    pub fn new() -> Self {
        ReloadStateBag {
            version: RELOAD_STATE_VERSION,
            singletons: FxHashMap::default(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Record the active flag of one instance of `key`.
    ///
    /// Several instances of a type may be captured; the entry stays `true` once
    /// any of them was active.
    pub fn record_singleton(&mut self, key: SingletonKey, was_active: bool) {
        let entry = self.singletons.entry(key.as_str().to_string()).or_default();
        entry.was_active |= was_active;
    }

    /// `true` only if an entry for `key` exists and says it was active.
    pub fn singleton_was_active(&self, key: SingletonKey) -> bool {
        self.singletons
            .get(key.as_str())
            .is_some_and(|s| s.was_active)
    }

    pub fn singleton_state(&self, key: SingletonKey) -> Option<SingletonReloadState> {
        self.singletons.get(key.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.singletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.singletons.is_empty()
    }

    /// Serialize for the trip across the reload.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode reload state: {}", e))
    }

    /// Parse a bag written before the reload.
    ///
    /// Returns an error for malformed text or a version mismatch.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let bag: ReloadStateBag = serde_json::from_str(text)
            .map_err(|e| format!("Failed to decode reload state: {}", e))?;
        if bag.version != RELOAD_STATE_VERSION {
            return Err(format!(
                "Reload state version {} does not match {}",
                bag.version, RELOAD_STATE_VERSION
            ));
        }
        Ok(bag)
    }
}
