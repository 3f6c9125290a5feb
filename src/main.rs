//! Blob Arena entry point
//!
//! Runs the simulation headless: the tracked player drives itself in idle
//! mode and the leaderboard is logged periodically. Pass a settings JSON
//! path as the first argument to override the defaults.

use std::time::{SystemTime, UNIX_EPOCH};

use blob_arena::renderer::build_frame;
use blob_arena::sim::{GameEvent, GameState, TickInput, tick};
use blob_arena::{Leaderboard, Settings};

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn log_leaderboard(state: &GameState) {
    let board = Leaderboard::from_state(state);
    log::info!(
        "Tick {}: {} players, {} food, your rank {:?}",
        state.time_ticks,
        state.players().len(),
        state.cells().len(),
        board.tracked_rank
    );
    for (i, entry) in board.entries.iter().enumerate() {
        log::info!("  {:>2}. {:<12} {}", i + 1, entry.name, entry.score);
    }
}

fn main() {
    env_logger::init();
    log::info!("Blob Arena (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(time_seed);

    let mut state = GameState::new(&settings, seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    while state.is_running() && state.time_ticks < settings.max_ticks {
        tick(&mut state, &input);

        for event in state.events() {
            match event {
                GameEvent::PlayerAbsorbed { consumer, victim } => {
                    log::debug!("Player {} absorbed player {}", consumer, victim);
                }
                GameEvent::Defeated { by } => {
                    log::info!("You were eaten by player {}!", by);
                }
            }
        }

        if settings.report_interval > 0 && state.time_ticks % settings.report_interval == 0 {
            log_leaderboard(&state);
            let frame = build_frame(&state);
            log::debug!(
                "Frame: {} commands, {} circles",
                frame.commands.len(),
                frame.circle_count()
            );
        }
    }

    log_leaderboard(&state);
    match state.tracked_player() {
        Some(player) => log::info!("Run ended ({:?}) with score {}", state.phase, player.score()),
        None => log::info!("Run ended ({:?})", state.phase),
    }
}
