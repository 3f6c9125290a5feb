//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (roster order, by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Absorption, can_absorb, can_eat_food};
pub use state::{
    AbsorbedRecord, BotBrain, Cell, GameEvent, GamePhase, GameState, Player, PlayerKind, Rgb,
    Target,
};
pub use tick::{TickInput, tick};
