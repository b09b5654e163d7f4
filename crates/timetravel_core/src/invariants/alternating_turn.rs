//! Alternating turn invariant: X marks odd steps, O marks even ones.

use super::Invariant;
use crate::Player;
use crate::machine::GameStateMachine;

/// Invariant: the mark added at step `i` belongs to the player to move at
/// step `i - 1`.
pub struct AlternatingTurnInvariant;

impl Invariant<GameStateMachine> for AlternatingTurnInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        game.history
            .iter()
            .enumerate()
            .skip(1)
            .all(|(step, mv)| mv.player() == Some(Player::to_move_at(step - 1)))
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
