//! Status line derived from the current board.

use crate::{Player, Position, Win};
use serde::Serialize;

/// What the renderer shows above the history list.
///
/// Never stored; recomputed from the state on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayStatus {
    /// The current board has a winning line.
    Winner {
        /// Owner of the line.
        player: Player,
        /// Cells to highlight.
        line: [Position; 3],
    },
    /// All nine moves made without a line.
    Draw,
    /// Game continues.
    NextPlayer {
        /// Player to move.
        player: Player,
    },
}

impl DisplayStatus {
    /// The winning line, if any.
    pub fn win(&self) -> Option<Win> {
        match *self {
            DisplayStatus::Winner { player, line } => Some(Win { player, line }),
            _ => None,
        }
    }

    /// Whether no further move can be made.
    pub fn is_over(&self) -> bool {
        !matches!(self, DisplayStatus::NextPlayer { .. })
    }
}

impl From<Win> for DisplayStatus {
    fn from(win: Win) -> Self {
        DisplayStatus::Winner {
            player: win.player,
            line: win.line,
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayStatus::Winner { player, .. } => write!(f, "Winner: {}", player),
            DisplayStatus::Draw => write!(f, "Draw"),
            DisplayStatus::NextPlayer { player } => write!(f, "Next player: {}", player),
        }
    }
}
