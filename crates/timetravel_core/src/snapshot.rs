//! Serializable read model of a game.

use crate::history::{DisplayOrder, HistoryEntry};
use crate::{Board, DisplayStatus, GameStateMachine, Player};
use serde::Serialize;

/// Everything a renderer needs, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Board at the current step (`null`, `"X"`, `"O"`).
    pub board: Board,
    /// Status line.
    pub status: DisplayStatus,
    /// Status line as text.
    pub message: String,
    /// Cells of the winning line, empty when undecided.
    pub winning_cells: Vec<usize>,
    /// Player to move at the current step.
    pub next_player: Player,
    /// Step being shown.
    pub current_step: usize,
    /// Number of snapshots in the history.
    pub history_len: usize,
    /// Order of `history`.
    pub display_order: DisplayOrder,
    /// History list in display order.
    pub history: Vec<HistoryEntry>,
}

impl From<&GameStateMachine> for GameSnapshot {
    fn from(game: &GameStateMachine) -> Self {
        let status = game.status();
        Self {
            board: game.board().clone(),
            status,
            message: status.to_string(),
            winning_cells: status.win().map(|w| w.indices().to_vec()).unwrap_or_default(),
            next_player: game.next_player(),
            current_step: game.current_step(),
            history_len: game.history().len(),
            display_order: game.display_order(),
            history: game.history_entries(),
        }
    }
}

impl GameStateMachine {
    /// Read model of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
