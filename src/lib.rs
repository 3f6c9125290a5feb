//! Blob Arena - A top-down mass-absorption arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AI, collisions, game state)
//! - `camera`: World-to-viewport transform that follows the tracked player
//! - `renderer`: Screen-space frame description for an external presenter
//! - `leaderboard`: Score ranking of live players
//! - `settings`: Data-driven game configuration

pub mod camera;
pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use camera::{Camera, CameraTarget};
pub use leaderboard::Leaderboard;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Default square arena extent (world units)
    pub const ARENA_SIZE: f32 = 2000.0;

    /// Food defaults
    pub const FOOD_MASS: f32 = 7.0;
    pub const FOOD_COUNT: usize = 2000;
    /// Food spawns this far inside the arena edge
    pub const FOOD_MARGIN: i32 = 20;
    /// Mass gained per food cell eaten
    pub const FOOD_MASS_GAIN: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START_MASS: f32 = 80.0;
    pub const BOT_START_MASS: f32 = 20.0;
    pub const BOT_COUNT: usize = 5;
    /// Spawn square for players (inclusive, world units)
    pub const PLAYER_SPAWN_MIN: i32 = 100;
    pub const PLAYER_SPAWN_MAX: i32 = 400;

    /// Absorption: consumer must exceed victim mass by this ratio
    pub const ABSORB_MASS_RATIO: f32 = 1.1;
    /// Fraction of the victim's mass the consumer gains
    pub const ABSORB_MASS_GAIN: f32 = 0.8;

    /// Bot ticks between target reassessments
    pub const BOT_DECISION_COOLDOWN: i32 = 5;
    /// Chance per reassessment that a bot also hunts players
    pub const BOT_HUNT_CHANCE: f32 = 0.3;
    /// Bots only hunt players below this fraction of their own mass
    pub const BOT_HUNT_MASS_RATIO: f32 = 0.9;
    /// A prey player wins over food when closer than this multiple
    pub const BOT_HUNT_DISTANCE_RATIO: f32 = 1.5;
    /// Floor for steering vector length
    pub const MIN_STEER_LENGTH: f32 = 0.01;

    /// Camera zoom = ZOOM_MASS_SCALE / mass + MIN_ZOOM
    pub const ZOOM_MASS_SCALE: f32 = 100.0;
    pub const MIN_ZOOM: f32 = 0.3;
    pub const INITIAL_ZOOM: f32 = 0.5;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    (dx * dx + dy * dy).sqrt()
}
