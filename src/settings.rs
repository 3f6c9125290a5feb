//! Game settings
//!
//! Read from a JSON file by the native runner. Missing fields fall back to
//! their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Arena and run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,

    // === Arena ===
    /// Side length of the square arena
    pub arena_size: f32,
    /// Food cells spawned at start
    pub food_count: usize,
    /// Bots spawned at start
    pub bot_count: usize,

    // === Players ===
    pub player_name: String,
    pub player_start_mass: f32,
    pub bot_start_mass: f32,

    // === Run ===
    /// Fixed seed; a time-based one is used when absent
    pub seed: Option<u64>,
    /// Headless runner stops after this many ticks
    pub max_ticks: u64,
    /// Ticks between leaderboard log lines
    pub report_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: SCREEN_WIDTH,
            viewport_height: SCREEN_HEIGHT,

            arena_size: ARENA_SIZE,
            food_count: FOOD_COUNT,
            bot_count: BOT_COUNT,

            player_name: "GeoVas".to_string(),
            player_start_mass: PLAYER_START_MASS,
            bot_start_mass: BOT_START_MASS,

            seed: None,
            max_ticks: 50 * 60 * 5,
            report_interval: 50 * 10,
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self::validated)
    }

    /// Replace unusable start masses with their defaults.
    ///
    /// Zoom and reach divide by mass, so it must be finite and positive.
    pub fn validated(mut self) -> Self {
        if !is_valid_mass(self.player_start_mass) {
            log::warn!(
                "Invalid player_start_mass {}, using {}",
                self.player_start_mass,
                PLAYER_START_MASS
            );
            self.player_start_mass = PLAYER_START_MASS;
        }
        if !is_valid_mass(self.bot_start_mass) {
            log::warn!(
                "Invalid bot_start_mass {}, using {}",
                self.bot_start_mass,
                BOT_START_MASS
            );
            self.bot_start_mass = BOT_START_MASS;
        }
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

fn is_valid_mass(mass: f32) -> bool {
    mass.is_finite() && mass > 0.0
}
