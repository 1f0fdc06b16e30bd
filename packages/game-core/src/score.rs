use serde::{Deserialize, Serialize};

use crate::protocol::{RoundResult, Side};

/// First side to this many round wins takes the game.
pub const WIN_THRESHOLD: u32 = 3;

/// Cumulative counters for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub player: u32,
    pub ai: u32,
    pub draws: u32,
}

impl ScoreBoard {
    /// Apply a single round result.
    pub fn record(&mut self, result: RoundResult) {
        match result {
            RoundResult::Win => self.player += 1,
            RoundResult::Lose => self.ai += 1,
            RoundResult::Draw => self.draws += 1,
        }
    }

    pub fn is_over(&self) -> bool {
        self.player == WIN_THRESHOLD || self.ai == WIN_THRESHOLD
    }

    /// The side that reached the threshold, if any.
    pub fn winner(&self) -> Option<Side> {
        if self.player == WIN_THRESHOLD {
            Some(Side::Player)
        } else if self.ai == WIN_THRESHOLD {
            Some(Side::Ai)
        } else {
            None
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.player + self.ai + self.draws
    }
}
