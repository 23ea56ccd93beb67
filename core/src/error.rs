use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid dimensions {rows}x{cols}, at least two cells are needed")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Word source is empty, cannot seed the grid")]
    EmptyWordSource,
    #[error("Not enough free cells, requested {requested} but only {available} available")]
    NotEnoughFreeCells {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Start and destination must be distinct, unblocked cells")]
    InvalidEndpoints,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
