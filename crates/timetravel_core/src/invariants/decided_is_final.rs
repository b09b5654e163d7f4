//! Decided-is-final invariant: nothing follows a won board.

use super::Invariant;
use crate::machine::GameStateMachine;
use crate::rules;

/// Invariant: only the last snapshot may contain a winning line.
pub struct DecidedIsFinalInvariant;

impl Invariant<GameStateMachine> for DecidedIsFinalInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        let moves = game.history.as_slice();
        let settled = moves.len().saturating_sub(1);
        moves[..settled]
            .iter()
            .all(|mv| rules::evaluate(&mv.squares).is_none())
    }

    fn description() -> &'static str {
        "No move follows a winning line"
    }
}
