//! Game settings and preferences
//!
//! Read once at startup from an optional JSON file. Missing keys keep their
//! defaults, so a file can override just the values it cares about. Settings
//! are never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::sim::geometry::Playfield;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Simulation ===
    /// RNG seed; a fresh one is drawn each run when absent
    pub seed: Option<u64>,
    /// Frames the headless runner simulates
    pub frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
            frames: 3600,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    ///
    /// An unreadable file, a parse error or an unusable playfield size is
    /// logged and the defaults are used instead. Never fails.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Can't read settings from {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&contents) {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::warn!("Ignoring settings in {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Option<Self> {
        let settings: Settings = match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse settings: {e}");
                return None;
            }
        };

        if !(settings.width.is_finite() && settings.height.is_finite())
            || settings.width <= 0.0
            || settings.height <= 0.0
        {
            log::warn!(
                "Playfield must be positive, got {} x {}",
                settings.width,
                settings.height
            );
            return None;
        }

        Some(settings)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }
}
