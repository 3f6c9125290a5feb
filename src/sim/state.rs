//! Game state and core simulation types
//!
//! Entities never hold references to each other. Bots point at their
//! current target through an id handle that is resolved against the
//! state every tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::*;
use crate::settings::Settings;

/// RGB color triple
pub type Rgb = [u8; 3];

/// Player body colors
pub const PLAYER_COLORS: [Rgb; 7] = [
    [37, 7, 255],
    [35, 183, 253],
    [48, 254, 241],
    [19, 79, 251],
    [255, 7, 230],
    [255, 7, 23],
    [6, 254, 13],
];

/// Food cell colors
pub const FOOD_COLORS: [Rgb; 11] = [
    [80, 252, 54],
    [36, 244, 255],
    [243, 31, 46],
    [4, 39, 243],
    [254, 6, 178],
    [255, 211, 7],
    [216, 6, 254],
    [145, 255, 7],
    [7, 255, 182],
    [255, 6, 86],
    [147, 7, 255],
];

/// Darker shade used for a player's outline (each channel loses a third)
pub fn outline_color(color: Rgb) -> Rgb {
    color.map(|c| {
        let c = c as f32;
        (c - c / 3.0) as u8
    })
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Tracked player was absorbed
    Defeated,
    /// External quit request
    Stopped,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `consumer` absorbed `victim`
    PlayerAbsorbed { consumer: u32, victim: u32 },
    /// The tracked player was absorbed by `by`
    Defeated { by: u32 },
}

/// A stationary food particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: u32,
    pub pos: Vec2,
    pub mass: f32,
    pub color: Rgb,
}

impl Cell {
    pub fn new(id: u32, pos: Vec2, color: Rgb) -> Self {
        Self {
            id,
            pos,
            mass: FOOD_MASS,
            color,
        }
    }
}

/// What a bot is currently chasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Food(u32),
    Player(u32),
}

/// AI state carried by bot players
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotBrain {
    pub target: Option<Target>,
    /// Ticks left before the target is reassessed
    pub decision_cooldown: i32,
}

/// Who drives a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Moved by directional input
    Controlled,
    /// Moved by its own brain
    Ai(BotBrain),
}

impl PlayerKind {
    pub fn bot() -> Self {
        PlayerKind::Ai(BotBrain::default())
    }
}

/// Visual trace of a player that was absorbed, nested inside its absorber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsorbedRecord {
    pub color: Rgb,
    pub outline_color: Rgb,
    pub name: String,
    /// Current mass, scaled along with the owner
    pub mass: f32,
    /// Mass of the victim when it was absorbed
    pub original_mass: f32,
    /// Owner's mass just before the absorption
    pub owner_mass: f32,
    /// Direction from the owner's center (radians, [0, 2π))
    pub angle: f32,
    /// Fraction of the free radius between owner edge and center, [0.2, 0.7]
    pub distance_factor: f32,
}

/// A mass-carrying player, either user-controlled or a bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub pos: Vec2,
    pub mass: f32,
    pub speed: f32,
    pub color: Rgb,
    pub outline_color: Rgb,
    /// Absorbed players, oldest first
    pub absorbed: Vec<AbsorbedRecord>,
    pub original_mass: f32,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(id: u32, name: &str, mass: f32, pos: Vec2, color: Rgb, kind: PlayerKind) -> Self {
        let name = if name.is_empty() { "Anonymous" } else { name };
        Self {
            id,
            name: name.to_string(),
            pos,
            mass,
            speed: PLAYER_SPEED,
            color,
            outline_color: outline_color(color),
            absorbed: Vec::new(),
            original_mass: mass,
            kind,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Ai(_))
    }

    pub fn brain(&self) -> Option<&BotBrain> {
        match &self.kind {
            PlayerKind::Ai(brain) => Some(brain),
            PlayerKind::Controlled => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut BotBrain> {
        match &mut self.kind {
            PlayerKind::Ai(brain) => Some(brain),
            PlayerKind::Controlled => None,
        }
    }

    /// Grow by `amount`, rescaling every absorbed record by the same factor
    pub fn add_mass(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let old_mass = self.mass;
        self.mass += amount;

        let scale = self.mass / old_mass;
        for record in &mut self.absorbed {
            record.mass *= scale;
        }
    }

    /// Take in `victim`: nest a trace of it, then gain part of its mass.
    ///
    /// The new record grows along with the owner's gain from this absorption.
    pub fn absorb(&mut self, victim: &Player, angle: f32, distance_factor: f32) {
        self.absorbed.push(AbsorbedRecord {
            color: victim.color,
            outline_color: victim.outline_color,
            name: victim.name.clone(),
            mass: victim.mass,
            original_mass: victim.mass,
            owner_mass: self.mass,
            angle,
            distance_factor,
        });
        self.add_mass(victim.mass * ABSORB_MASS_GAIN);
    }

    /// Displayed score
    pub fn score(&self) -> u64 {
        (self.mass * 2.0) as u64
    }
}

/// Complete simulation context (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Live food cells (sorted by id)
    pub(crate) cells: Vec<Cell>,
    /// Live players in roster order (sorted by id, first drawn first)
    pub(crate) players: Vec<Player>,
    /// Id of the player the camera follows
    pub tracked: Option<u32>,
    pub camera: Camera,
    /// Events raised during the last tick
    pub(crate) events: Vec<GameEvent>,
    /// Square arena extent
    pub arena_size: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an empty arena with no entities
    pub fn empty(seed: u64, viewport: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            cells: Vec::new(),
            players: Vec::new(),
            tracked: None,
            camera: Camera::new(viewport),
            events: Vec::new(),
            arena_size: ARENA_SIZE,
            next_id: 1,
        }
    }

    /// Create a populated arena: food, the tracked player, then bots
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let settings = settings.clone().validated();
        let mut state = Self::empty(seed, settings.viewport());
        state.arena_size = settings.arena_size;

        state.spawn_food(settings.food_count);

        let id = state.spawn_player(
            &settings.player_name,
            settings.player_start_mass,
            PlayerKind::Controlled,
        );
        state.tracked = Some(id);

        for i in 0..settings.bot_count {
            state.spawn_player(&format!("Bot {}", i + 1), settings.bot_start_mass, PlayerKind::bot());
        }

        if let Some(i) = state.player_index(id) {
            state.camera.update(&state.players[i]);
        }

        log::info!(
            "Arena created with seed {}: {} food, {} players",
            seed,
            state.cells.len(),
            state.players.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scatter `count` food cells at random positions inside the arena margin
    pub fn spawn_food(&mut self, count: usize) {
        let max = (self.arena_size as i32 - FOOD_MARGIN).max(FOOD_MARGIN);
        self.cells.reserve(count);
        for _ in 0..count {
            let x = self.rng.random_range(FOOD_MARGIN..=max);
            let y = self.rng.random_range(FOOD_MARGIN..=max);
            let color = FOOD_COLORS[self.rng.random_range(0..FOOD_COLORS.len())];
            self.add_cell(Vec2::new(x as f32, y as f32), color);
        }
    }

    /// Add a player at a random spawn point with a random color
    pub fn spawn_player(&mut self, name: &str, mass: f32, kind: PlayerKind) -> u32 {
        let x = self.rng.random_range(PLAYER_SPAWN_MIN..=PLAYER_SPAWN_MAX);
        let y = self.rng.random_range(PLAYER_SPAWN_MIN..=PLAYER_SPAWN_MAX);
        let color = PLAYER_COLORS[self.rng.random_range(0..PLAYER_COLORS.len())];
        self.add_player(name, mass, Vec2::new(x as f32, y as f32), color, kind)
    }

    /// Add a food cell at an exact position
    pub fn add_cell(&mut self, pos: Vec2, color: Rgb) -> u32 {
        let id = self.next_entity_id();
        self.cells.push(Cell::new(id, pos, color));
        id
    }

    /// Add a player at an exact position
    pub fn add_player(&mut self, name: &str, mass: f32, pos: Vec2, color: Rgb, kind: PlayerKind) -> u32 {
        let id = self.next_entity_id();
        self.players.push(Player::new(id, name, mass, pos, color, kind));
        id
    }

    /// Live food cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Live players in draw order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Events raised during the last tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn cell(&self, id: u32) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.cells[i])
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.player_index(id).map(|i| &self.players[i])
    }

    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        let i = self.player_index(id)?;
        Some(&mut self.players[i])
    }

    pub(crate) fn player_index(&self, id: u32) -> Option<usize> {
        self.players.binary_search_by_key(&id, |p| p.id).ok()
    }

    pub fn tracked_player(&self) -> Option<&Player> {
        self.tracked.and_then(|id| self.player(id))
    }

    /// Position of a target, if it is still alive
    pub fn target_position(&self, target: Target) -> Option<Vec2> {
        match target {
            Target::Food(id) => self.cell(id).map(|c| c.pos),
            Target::Player(id) => self.player(id).map(|p| p.pos),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.phase == GamePhase::Defeated
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
