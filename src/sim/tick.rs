//! Simulation tick
//!
//! One call advances the arena by one step: AI decisions, movement, food,
//! absorption, removal, then the camera follows the tracked player.

use glam::Vec2;

use super::ai;
use super::collision::{self, Absorption};
use super::state::{GameEvent, GamePhase, GameState, PlayerKind};
use crate::distance;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions for the tracked player
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Stop the run at this tick boundary
    pub quit: bool,
    /// Idle/demo mode - the tracked player steers itself toward food
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.quit && state.phase == GamePhase::Playing {
        log::info!("Quit requested at tick {}", state.time_ticks);
        state.phase = GamePhase::Stopped;
    }

    // Don't tick once the run is over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    // Bots decide where to go
    for i in 0..state.players.len() {
        ai::think(i, &mut state.players, &state.cells, &mut state.rng);
    }

    // Move everyone
    for i in 0..state.players.len() {
        let dest = state.players[i]
            .brain()
            .and_then(|brain| brain.target)
            .and_then(|target| state.target_position(target));

        let tracked = state.tracked;
        let player = &mut state.players[i];
        match player.kind {
            // Input only drives the tracked player
            PlayerKind::Controlled if tracked == Some(player.id) => {
                player.pos += input_velocity(input, player.speed);
            }
            PlayerKind::Controlled => {}
            PlayerKind::Ai(_) => {
                if let Some(dest) = dest {
                    ai::steer(player, dest);
                }
            }
        }
    }

    // Food, in roster order
    for player in state.players.iter_mut() {
        collision::eat_food(player, &mut state.cells);
    }

    // Players eat each other
    let absorptions = collision::resolve_absorptions(&mut state.players, &mut state.rng);
    remove_absorbed(state, &absorptions);

    ai::clear_stale_targets(&mut state.players, &state.cells);

    if let Some(i) = state.tracked.and_then(|id| state.player_index(id)) {
        state.camera.update(&state.players[i]);
    }
}

/// Per-axis velocity from held directions. Diagonals are not normalized.
fn input_velocity(input: &TickInput, speed: f32) -> Vec2 {
    let mut vel = Vec2::ZERO;
    if input.left {
        vel.x = -speed;
    }
    if input.right {
        vel.x = speed;
    }
    if input.up {
        vel.y = -speed;
    }
    if input.down {
        vel.y = speed;
    }
    vel
}

/// Point the tracked player at the nearest food
fn autopilot(state: &GameState, input: &mut TickInput) {
    let Some(player) = state.tracked_player() else {
        return;
    };

    let nearest = state.cells.iter().min_by(|a, b| {
        distance(a.pos, player.pos)
            .partial_cmp(&distance(b.pos, player.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(cell) = nearest {
        let delta = cell.pos - player.pos;
        input.left = delta.x < -player.speed;
        input.right = delta.x > player.speed;
        input.up = delta.y < -player.speed;
        input.down = delta.y > player.speed;
    }
}

/// Drop absorbed players from the roster and raise events
fn remove_absorbed(state: &mut GameState, absorptions: &[Absorption]) {
    if absorptions.is_empty() {
        return;
    }

    for absorption in absorptions {
        state.events.push(GameEvent::PlayerAbsorbed {
            consumer: absorption.consumer,
            victim: absorption.victim,
        });

        let victim = state.player(absorption.victim).map(|p| p.name.as_str()).unwrap_or("?");
        let consumer = state.player(absorption.consumer).map(|p| p.name.as_str()).unwrap_or("?");

        if state.tracked == Some(absorption.victim) {
            log::info!("Game over! {} was absorbed by {}", victim, consumer);
            state.phase = GamePhase::Defeated;
            state.events.push(GameEvent::Defeated {
                by: absorption.consumer,
            });
        } else {
            log::info!("Removing {} (absorbed by {})", victim, consumer);
        }
    }

    state
        .players
        .retain(|p| !absorptions.iter().any(|a| a.victim == p.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{FOOD_COLORS, PLAYER_COLORS, Target};
    use std::collections::HashMap;

    fn arena() -> GameState {
        GameState::empty(12345, Vec2::new(800.0, 500.0))
    }

    fn add_tracked(state: &mut GameState, mass: f32, pos: Vec2) -> u32 {
        let id = state.add_player("You", mass, pos, PLAYER_COLORS[0], PlayerKind::Controlled);
        state.tracked = Some(id);
        id
    }

    #[test]
    fn test_tick_eats_food() {
        let mut state = arena();
        let id = add_tracked(&mut state, 80.0, Vec2::new(100.0, 100.0));
        state.add_cell(Vec2::new(102.0, 101.0), FOOD_COLORS[0]);

        tick(&mut state, &TickInput::default());
        assert!(state.cells().is_empty());
        assert_eq!(state.player(id).unwrap().mass, 80.5);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_absorbs_player() {
        let mut state = arena();
        let a = add_tracked(&mut state, 100.0, Vec2::new(0.0, 0.0));
        let b = state.add_player("B", 80.0, Vec2::new(10.0, 0.0), PLAYER_COLORS[1], PlayerKind::Controlled);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.players().len(), 1);
        assert!((state.player(a).unwrap().mass - 164.0).abs() < 1e-4);
        assert!(state.player(b).is_none());
        assert_eq!(
            state.events(),
            &[GameEvent::PlayerAbsorbed {
                consumer: a,
                victim: b
            }]
        );
        assert!(state.is_running());
        assert!((state.camera.zoom - (100.0 / 164.0 + 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_tick_close_masses_coexist() {
        let mut state = arena();
        add_tracked(&mut state, 100.0, Vec2::new(0.0, 0.0));
        state.add_player("B", 95.0, Vec2::new(5.0, 0.0), PLAYER_COLORS[1], PlayerKind::Controlled);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.players().len(), 2);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_tracked_player_absorbed_ends_run() {
        let mut state = arena();
        let you = add_tracked(&mut state, 20.0, Vec2::new(0.0, 0.0));
        let bot = state.add_player("Bot 1", 100.0, Vec2::new(5.0, 0.0), PLAYER_COLORS[2], PlayerKind::bot());

        tick(&mut state, &TickInput::default());
        assert!(state.is_defeated());
        assert!(state.tracked_player().is_none());
        assert!(state.events().contains(&GameEvent::Defeated { by: bot }));
        assert!(state.player(you).is_none());

        // Further ticks are no-ops
        let ticks = state.time_ticks;
        let camera = state.camera.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.camera.offset, camera.offset);
    }

    #[test]
    fn test_quit_stops_run() {
        let mut state = arena();
        add_tracked(&mut state, 20.0, Vec2::ZERO);
        tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_directional_movement() {
        let mut state = arena();
        let id = add_tracked(&mut state, 20.0, Vec2::new(50.0, 50.0));

        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player(id).unwrap().pos, Vec2::new(54.0, 54.0));

        // Opposing keys: right and down win
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player(id).unwrap().pos, Vec2::new(58.0, 58.0));

        // No clamping at the arena edge
        state.player_mut(id).unwrap().pos = Vec2::new(1.0, 1.0);
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player(id).unwrap().pos, Vec2::new(-3.0, -3.0));
    }

    #[test]
    fn test_input_ignores_untracked_controlled_player() {
        let mut state = arena();
        let you = add_tracked(&mut state, 20.0, Vec2::new(50.0, 50.0));
        let other = state.add_player("Other", 20.0, Vec2::new(500.0, 500.0), PLAYER_COLORS[1], PlayerKind::Controlled);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player(you).unwrap().pos, Vec2::new(54.0, 50.0));
        assert_eq!(state.player(other).unwrap().pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_camera_follows_tracked_player() {
        let mut state = arena();
        let id = add_tracked(&mut state, 80.0, Vec2::new(640.0, 480.0));
        tick(&mut state, &TickInput::default());

        let player = state.player(id).unwrap();
        let screen = state.camera.world_to_screen(player.pos);
        assert!((screen - state.camera.viewport_center()).length() < 1e-3);
    }

    #[test]
    fn test_bot_target_cleared_when_food_eaten() {
        let mut state = arena();
        add_tracked(&mut state, 80.0, Vec2::new(0.0, 0.0));
        let bot = state.add_player("Bot 1", 20.0, Vec2::new(500.0, 0.0), PLAYER_COLORS[3], PlayerKind::bot());
        // Closer to the bot than anything else, but inside the tracked player's reach
        let food = state.add_cell(Vec2::new(30.0, 0.0), FOOD_COLORS[1]);

        tick(&mut state, &TickInput::default());
        assert!(state.cell(food).is_none());
        assert_eq!(state.player(bot).unwrap().brain().unwrap().target, None);
    }

    #[test]
    fn test_bot_walks_to_food() {
        let mut state = arena();
        let bot = state.add_player("Bot 1", 20.0, Vec2::new(0.0, 0.0), PLAYER_COLORS[3], PlayerKind::bot());
        let food = state.add_cell(Vec2::new(30.0, 40.0), FOOD_COLORS[1]);

        tick(&mut state, &TickInput::default());
        let player = state.player(bot).unwrap();
        assert_eq!(player.brain().unwrap().target, Some(Target::Food(food)));
        assert!((player.pos - Vec2::new(2.4, 3.2)).length() < 1e-5);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.cell(food).is_none());
        assert_eq!(state.player(bot).unwrap().mass, 20.5);
    }

    #[test]
    fn test_empty_arena_keeps_ticking() {
        let mut state = arena();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 10);
        assert!(state.is_running());
    }

    #[test]
    fn test_full_game_invariants() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 777);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut last_mass: HashMap<u32, f32> = state.players().iter().map(|p| (p.id, p.mass)).collect();
        let mut last_cells = state.cells().len();

        for _ in 0..400 {
            tick(&mut state, &input);
            if !state.is_running() {
                break;
            }

            // Draw order stays in roster (id) order
            assert!(state.players().windows(2).all(|w| w[0].id < w[1].id));
            // Food only disappears
            assert!(state.cells().len() <= last_cells);
            last_cells = state.cells().len();

            for player in state.players() {
                let prev = last_mass.get(&player.id).copied().unwrap_or(player.original_mass);
                assert!(player.mass >= prev, "{} shrank", player.name);
                last_mass.insert(player.id, player.mass);

                for record in &player.absorbed {
                    let lhs = record.mass / record.original_mass;
                    let rhs = player.mass / record.owner_mass;
                    assert!((lhs - rhs).abs() < 1e-3, "record scale {lhs} != owner scale {rhs}");
                }
            }
        }
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(&settings, 99999);
        let mut state2 = GameState::new(&settings, 99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..100 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.cells().len(), state2.cells().len());
        assert_eq!(state1.players().len(), state2.players().len());
        for (a, b) in state1.players().iter().zip(state2.players()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.mass, b.mass);
        }
    }
}
