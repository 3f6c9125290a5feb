//! Bot brains: target selection and steering
//!
//! Bots chase the nearest food and, now and then, a noticeably smaller
//! player that is close enough to be worth the detour.

use glam::Vec2;
use rand::Rng;

use super::state::{Cell, Player, Target};
use crate::consts::*;
use crate::distance;

/// Pick a new target for `bot`.
///
/// The nearest cell always qualifies. With `BOT_HUNT_CHANCE` the bot also
/// considers players lighter than `BOT_HUNT_MASS_RATIO` of its own mass; one
/// of them replaces the food when closer than `BOT_HUNT_DISTANCE_RATIO`
/// times the best distance so far. Ties keep the first candidate scanned.
pub fn choose_target<R: Rng>(
    bot: &Player,
    players: &[Player],
    cells: &[Cell],
    rng: &mut R,
) -> Option<Target> {
    let mut best = None;
    let mut best_dist = f32::INFINITY;

    for cell in cells {
        let dist = distance(bot.pos, cell.pos);
        if dist < best_dist {
            best_dist = dist;
            best = Some(Target::Food(cell.id));
        }
    }

    if rng.random::<f32>() < BOT_HUNT_CHANCE {
        for other in players {
            if other.id == bot.id || other.mass >= bot.mass * BOT_HUNT_MASS_RATIO {
                continue;
            }
            let dist = distance(bot.pos, other.pos);
            if dist < best_dist * BOT_HUNT_DISTANCE_RATIO {
                best_dist = dist;
                best = Some(Target::Player(other.id));
            }
        }
    }

    best
}

/// Run one decision step for the bot at `index`.
///
/// A bot whose target is gone, or whose cooldown has run out, picks a new
/// target and resets the cooldown. Otherwise the cooldown ticks down.
/// Controlled players are left alone.
pub fn think<R: Rng>(index: usize, players: &mut [Player], cells: &[Cell], rng: &mut R) {
    let Some(brain) = players[index].brain() else {
        return;
    };

    let target_alive = brain.target.is_some_and(|t| target_exists(t, &*players, cells));
    if target_alive && brain.decision_cooldown > 0 {
        if let Some(brain) = players[index].brain_mut() {
            brain.decision_cooldown -= 1;
        }
        return;
    }

    let target = choose_target(&players[index], players, cells, rng);
    if let Some(brain) = players[index].brain_mut() {
        brain.decision_cooldown = BOT_DECISION_COOLDOWN;
        brain.target = target;
    }
}

/// Move `speed` units straight toward `dest`
pub fn steer(player: &mut Player, dest: Vec2) {
    let delta = dest - player.pos;
    let length = delta.length().max(MIN_STEER_LENGTH);
    player.pos += delta / length * player.speed;
}

fn target_exists(target: Target, players: &[Player], cells: &[Cell]) -> bool {
    match target {
        Target::Food(id) => cells.binary_search_by_key(&id, |c| c.id).is_ok(),
        Target::Player(id) => players.binary_search_by_key(&id, |p| p.id).is_ok(),
    }
}

/// Clear targets that point at entities no longer in the arena
pub fn clear_stale_targets(players: &mut [Player], cells: &[Cell]) {
    let live: Vec<u32> = players.iter().map(|p| p.id).collect();
    for player in players.iter_mut() {
        let Some(brain) = player.brain_mut() else {
            continue;
        };
        let stale = match brain.target {
            Some(Target::Food(id)) => cells.binary_search_by_key(&id, |c| c.id).is_err(),
            Some(Target::Player(id)) => live.binary_search(&id).is_err(),
            None => false,
        };
        if stale {
            brain.target = None;
        }
    }
}
