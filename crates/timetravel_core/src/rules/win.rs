//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning lines, checked in this order.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    /// Owner of the line.
    pub player: Player,
    /// The three positions of the line.
    pub line: [Position; 3],
}

impl Win {
    /// Board indices of the winning line.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }

    /// Checks whether a position belongs to the winning line.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }
}

/// Either no winner (`None`) or the winning line.
pub type WinResult = Option<Win>;

/// Evaluates the board against every winning line.
///
/// The first matching line in [`WINNING_LINES`] order is returned. A full
/// board without a line is `None`; draws are detected by the caller.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> WinResult {
    WINNING_LINES.into_iter().find_map(|line @ [a, b, c]| {
        let cell = board.get(a);
        match cell {
            Cell::Occupied(player) if cell == board.get(b) && cell == board.get(c) => {
                Some(Win { player, line })
            }
            _ => None,
        }
    })
}
