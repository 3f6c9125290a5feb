//! Food consumption and player-vs-player absorption
//!
//! Both passes scan first and remove afterwards, so nothing is skipped or
//! counted twice while the collections shrink.

use std::f32::consts::TAU;

use rand::Rng;

use super::state::{Cell, Player};
use crate::consts::{ABSORB_MASS_RATIO, FOOD_MASS_GAIN};
use crate::distance;

/// One absorption resolved during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorption {
    pub consumer: u32,
    pub victim: u32,
}

/// Whether a cell lies within a player's reach
#[inline]
pub fn can_eat_food(player: &Player, cell: &Cell) -> bool {
    distance(cell.pos, player.pos) <= player.mass / 2.0
}

/// Whether `a` is big enough and close enough to absorb `b`
#[inline]
pub fn can_absorb(a: &Player, b: &Player) -> bool {
    a.mass > b.mass * ABSORB_MASS_RATIO && distance(a.pos, b.pos) < a.mass / 2.0 - b.mass / 4.0
}

/// Eat every cell within reach of `player` and drop it from `cells`.
///
/// Cells are checked in order and each one eaten grows the player at once,
/// so reach widens during the scan. Returns the number of cells eaten.
pub fn eat_food(player: &mut Player, cells: &mut Vec<Cell>) -> usize {
    let mut eaten = 0;
    cells.retain(|cell| {
        if can_eat_food(player, cell) {
            player.add_mass(FOOD_MASS_GAIN);
            eaten += 1;
            false
        } else {
            true
        }
    });
    eaten
}

/// Borrow `players[consumer]` mutably alongside `players[victim]`
fn pair_mut(players: &mut [Player], consumer: usize, victim: usize) -> (&mut Player, &Player) {
    debug_assert_ne!(consumer, victim);
    if consumer < victim {
        let (head, tail) = players.split_at_mut(victim);
        (&mut head[consumer], &tail[0])
    } else {
        let (head, tail) = players.split_at_mut(consumer);
        (&mut tail[0], &head[victim])
    }
}

/// Check every ordered pair of live players and apply absorptions.
///
/// The first eligible consumer wins. Once a player has been absorbed it is
/// neither consumer nor victim for the rest of the pass. Consumers grow as
/// they go, so later checks see the updated mass. Victims are left in
/// `players`; the caller removes them using the returned list.
pub fn resolve_absorptions<R: Rng>(players: &mut [Player], rng: &mut R) -> Vec<Absorption> {
    let mut removed = vec![false; players.len()];
    let mut absorptions = Vec::new();

    for i in 0..players.len() {
        if removed[i] {
            continue;
        }
        for j in 0..players.len() {
            if i == j || removed[j] {
                continue;
            }

            let (consumer, victim) = pair_mut(players, i, j);
            if !can_absorb(consumer, victim) {
                continue;
            }

            let angle = rng.random_range(0.0..TAU);
            let distance_factor = rng.random_range(0.2..=0.7);
            consumer.absorb(victim, angle, distance_factor);
            removed[j] = true;

            log::debug!(
                "{} absorbed {} (mass now {:.1})",
                consumer.name,
                victim.name,
                consumer.mass
            );
            absorptions.push(Absorption {
                consumer: consumer.id,
                victim: victim.id,
            });
        }
    }

    absorptions
}
