#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use dictionary::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod dictionary;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Game balance for one session: grid size, move budget, win target and how many special cells to scatter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub moves: u32,
    pub required_words: CellCount,
    pub blocked: CellCount,
    pub bonus: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(
        size: Coord2,
        moves: u32,
        required_words: CellCount,
        blocked: CellCount,
        bonus: CellCount,
    ) -> Self {
        Self {
            size,
            moves,
            required_words,
            blocked,
            bonus,
        }
    }

    /// Derives the move budget and word target from the difficulty tier, then reserves 10% of the cells as blocked
    /// and 5% as bonus cells.
    pub fn new(difficulty: Difficulty, (rows, cols): Coord2) -> Result<Self> {
        let total = mult(rows, cols);
        if total < 2 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }

        let cells = u32::from(total);
        let (moves, required_words) = match difficulty {
            Difficulty::Easy => (cells, (total / 10).max(5)),
            Difficulty::Medium => (cells * 3, (total / 8).max(8)),
            Difficulty::Hard => (cells * 4, (total / 6).max(12)),
        };

        Ok(Self::new_unchecked(
            (rows, cols),
            moves,
            required_words,
            total / 10,
            total / 20,
        ))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Outcome of extending the current path
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Rejected,
    Extended,
    /// Accepted, but it was the last move and the word target was not met
    OutOfMoves,
}

impl MoveOutcome {
    pub const fn is_accepted(self) -> bool {
        match self {
            Self::Rejected => false,
            Self::Extended => true,
            Self::OutOfMoves => true,
        }
    }
}

/// Points earned by one accepted word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScore {
    pub base: u32,
    pub shortest_path_bonus: u32,
    pub bonus_cells: u32,
}

impl WordScore {
    pub const fn total(&self) -> u32 {
        self.base
            .saturating_add(self.shortest_path_bonus)
            .saturating_add(self.bonus_cells)
    }
}

/// Outcome of submitting the current path as a word
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Not a word, already found, or nothing traced
    Rejected,
    Accepted(WordScore),
    /// Accepted and the word target is now met
    Won(WordScore),
}

impl SubmitOutcome {
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }

    pub const fn score(self) -> Option<WordScore> {
        match self {
            Self::Rejected => None,
            Self::Accepted(score) | Self::Won(score) => Some(score),
        }
    }
}
