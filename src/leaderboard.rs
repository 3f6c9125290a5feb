//! Live leaderboard
//!
//! Ranks the players still in the arena by score for the HUD.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Player};

/// Maximum number of entries shown
pub const MAX_ENTRIES: usize = 10;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: u32,
    pub name: String,
    pub score: u64,
    /// This row is the tracked player
    pub tracked: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Top entries, highest score first
    pub entries: Vec<LeaderboardEntry>,
    /// Rank of the tracked player (1-indexed), even when outside the top entries
    pub tracked_rank: Option<usize>,
}

impl Leaderboard {
    pub fn from_state(state: &GameState) -> Self {
        Self::from_players(state.players(), state.tracked)
    }

    /// Rank `players` by score. Equal scores keep roster order.
    pub fn from_players(players: &[Player], tracked: Option<u32>) -> Self {
        let mut entries: Vec<LeaderboardEntry> = players
            .iter()
            .map(|p| LeaderboardEntry {
                player_id: p.id,
                name: p.name.clone(),
                score: p.score(),
                tracked: Some(p.id) == tracked,
            })
            .collect();

        // Stable sort, descending by score
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        let tracked_rank = entries.iter().position(|e| e.tracked).map(|i| i + 1);
        entries.truncate(MAX_ENTRIES);

        Self {
            entries,
            tracked_rank,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank of a player among the shown entries (1-indexed)
    pub fn rank_of(&self, player_id: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player_id == player_id)
            .map(|i| i + 1)
    }
}
