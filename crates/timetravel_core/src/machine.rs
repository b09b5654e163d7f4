//! Time-travel state machine for tic-tac-toe.
//!
//! The machine owns every board snapshot reached so far plus a pointer to
//! the one being shown. Playing from a past snapshot discards the snapshots
//! after it. Winner, draw and next player are derived on read.

use crate::contracts::{CellInBounds, Contract, JumpContract, MoveContract};
use crate::history::{DisplayOrder, History, HistoryEntry, Move};
use crate::rules;
use crate::{Board, CELL_COUNT, Cell, DisplayStatus, GameError, Player, Position, WinResult};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct Placement {
    /// Step the move created.
    step: usize,
    /// Who moved.
    player: Player,
    /// Where.
    position: Position,
}

/// Game state with move history and a movable current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateMachine {
    pub(crate) history: History,
    pub(crate) current_step: usize,
    pub(crate) display_order: DisplayOrder,
}

impl GameStateMachine {
    /// Creates a game at the start position.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            current_step: 0,
            display_order: DisplayOrder::default(),
        }
    }

    /// Plays a sequence of cell indices from a fresh game.
    ///
    /// Stops at the first rejected cell.
    #[instrument]
    pub fn replay(cells: &[usize]) -> Result<Self, GameError> {
        let mut game = Self::new();
        for &cell in cells {
            game.apply_move(cell)?;
        }
        Ok(game)
    }

    /// Marks `cell` for the player to move.
    ///
    /// Any snapshots after the current step are discarded first. Rejected
    /// moves leave the state untouched.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidIndex`] if `cell` is not in `0..9`
    /// - [`GameError::GameAlreadyDecided`] if the current board has a winner
    /// - [`GameError::CellOccupied`] if the cell is already marked
    #[instrument(skip(self), fields(step = self.current_step))]
    pub fn apply_move(&mut self, cell: usize) -> Result<Placement, GameError> {
        let position = CellInBounds::check(cell)
            .and_then(|position| MoveContract::pre(self, &position).map(|()| position))
            .inspect_err(|e| warn!(cell, error = %e, "Move rejected"))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.next_player();
        let mut squares = self.board().clone();
        squares.set(position, Cell::Occupied(player));
        let step = self.history.branch(
            self.current_step,
            Move {
                squares,
                position: Some(position),
            },
        );
        self.current_step = step;

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            warn!(error = %e, "Move broke an invariant, rolling back");
            *self = before;
            return Err(e);
        }

        debug!(%player, %position, step, "Move applied");
        Ok(Placement {
            step,
            player,
            position,
        })
    }

    /// Shows the snapshot at `step`; history is left as is.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidIndex`] if `step` is past the end of the history.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), GameError> {
        JumpContract::pre(self, &step).inspect_err(|e| warn!(step, error = %e, "Jump rejected"))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.current_step = step;

        #[cfg(debug_assertions)]
        if let Err(e) = JumpContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        debug!(step, next = %self.next_player(), "Jumped");
        Ok(())
    }

    /// Flips the order of the history list.
    #[instrument(skip(self))]
    pub fn toggle_sort_order(&mut self) -> DisplayOrder {
        self.display_order = self.display_order.toggle();
        debug!(order = ?self.display_order, "History order toggled");
        self.display_order
    }

    /// Status derived from the current board.
    ///
    /// A winning line takes precedence over a full board.
    pub fn status(&self) -> DisplayStatus {
        match self.winner() {
            Some(win) => win.into(),
            None if self.current_step >= CELL_COUNT => DisplayStatus::Draw,
            None => DisplayStatus::NextPlayer {
                player: self.next_player(),
            },
        }
    }

    /// Winning line on the current board.
    pub fn winner(&self) -> WinResult {
        rules::evaluate(self.board())
    }

    /// Whether the current board is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// Snapshot at the current step.
    pub fn current(&self) -> &Move {
        &self.history.as_slice()[self.current_step]
    }

    /// Board at the current step.
    pub fn board(&self) -> &Board {
        &self.current().squares
    }

    /// Full history, independent of the display order.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index of the snapshot being shown.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Player to move, from the parity of the current step.
    pub fn next_player(&self) -> Player {
        Player::to_move_at(self.current_step)
    }

    /// Order of the history list.
    pub fn display_order(&self) -> DisplayOrder {
        self.display_order
    }

    /// History list in display order, with the current step flagged.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        let entries = self
            .history
            .iter()
            .enumerate()
            .map(|(step, mv)| HistoryEntry::from_move(step, mv, self.current_step));
        match self.display_order {
            DisplayOrder::Ascending => entries.collect(),
            DisplayOrder::Descending => entries.rev().collect(),
        }
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
