//! History consistency invariant: each step adds exactly the recorded mark.

use super::Invariant;
use crate::machine::GameStateMachine;

/// Invariant: snapshot `i > 0` has one more mark than snapshot `i - 1`,
/// placed at the recorded position on a previously empty cell.
pub struct HistoryConsistentInvariant;

impl Invariant<GameStateMachine> for HistoryConsistentInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        game.history.as_slice().windows(2).all(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            match next.position {
                Some(pos) => {
                    next.squares.filled() == prev.squares.filled() + 1
                        && prev.squares.is_empty(pos)
                        && !next.squares.is_empty(pos)
                }
                None => false,
            }
        })
    }

    fn description() -> &'static str {
        "Each step adds exactly one mark at its recorded position"
    }
}
