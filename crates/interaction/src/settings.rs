//! Data-driven stage settings.
//!
//! Extracts the configurable surface of the subsystem into a single
//! [`StageSettings`] resource so it can be tuned without recompilation.
//! The app binary loads it from an optional JSON file; headless users get
//! the defaults from `init_resource`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunable configuration for the interaction subsystem.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Identifier list accepted at tracked-object setup. Reserved: carried
    /// through deserialization but read by no system yet.
    pub tracked_ids: Vec<String>,
    /// Selector naming the orchestra's conductor entity. When non-empty the
    /// relay resolves its source by `Name` match; when empty it falls back
    /// to the first `Conductor`-tagged entity.
    pub conductor_selector: String,
}

impl StageSettings {
    /// Load settings from a JSON file. An absent file yields the defaults;
    /// a malformed file yields the defaults and logs a warning.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("StageSettings: failed to parse {path}, using defaults: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
