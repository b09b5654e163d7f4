//! Monotonic board invariant: marks never change once placed.

use super::Invariant;
use crate::Cell;
use crate::machine::GameStateMachine;

/// Invariant: every occupied cell of a snapshot is unchanged in the next one.
pub struct MonotonicBoardInvariant;

impl Invariant<GameStateMachine> for MonotonicBoardInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        game.history.as_slice().windows(2).all(|pair| {
            pair[0]
                .squares
                .cells()
                .iter()
                .zip(pair[1].squares.cells())
                .all(|(prev, next)| *prev == Cell::Empty || prev == next)
        })
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_holds_for_played_game() {
        let game = GameStateMachine::replay(&[0, 4, 8, 2]).unwrap();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_mark_violates() {
        let mut game = GameStateMachine::replay(&[4, 0]).unwrap();
        game.history.moves[2]
            .squares
            .set(Position::Center, Cell::Occupied(Player::O));
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
