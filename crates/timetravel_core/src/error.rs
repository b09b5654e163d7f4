//! Rejections returned by the state machine.

use crate::{Player, Position};
use serde::{Deserialize, Serialize};

/// What an out-of-range index was meant to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IndexTarget {
    /// A board cell (0-8).
    #[display("cell")]
    Cell,
    /// A history step.
    #[display("step")]
    Step,
}

/// Error returned when an operation is rejected.
///
/// A rejected operation never changes the game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Cell index outside the board, or step outside the history.
    #[display("Invalid {target} index {index} (must be below {limit})")]
    InvalidIndex {
        /// Cell or step.
        target: IndexTarget,
        /// The index that was asked for.
        index: usize,
        /// Exclusive upper bound at the time of the request.
        limit: usize,
    },

    /// The cell is already marked.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(Position),

    /// The current board already has a winning line.
    #[display("Game is already decided: {_0} has won")]
    GameAlreadyDecided(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl GameError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidIndex { .. } => "invalid_index",
            GameError::CellOccupied(_) => "cell_occupied",
            GameError::GameAlreadyDecided(_) => "game_already_decided",
            GameError::InvariantViolation(_) => "invariant_violation",
        }
    }
}

impl std::error::Error for GameError {}
