//! Initial snapshot invariant: the history starts from an empty board.

use super::Invariant;
use crate::history::Move;
use crate::machine::GameStateMachine;

/// Invariant: `history[0]` is the empty board with no position.
pub struct InitialSnapshotInvariant;

impl Invariant<GameStateMachine> for InitialSnapshotInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        game.history.get(0) == Some(&Move::initial())
    }

    fn description() -> &'static str {
        "History starts with the empty board"
    }
}
