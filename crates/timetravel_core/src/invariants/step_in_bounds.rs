//! Step-in-bounds invariant: the current step addresses a snapshot.

use super::Invariant;
use crate::machine::GameStateMachine;

/// Invariant: `current_step < history.len()`.
pub struct StepInBoundsInvariant;

impl Invariant<GameStateMachine> for StepInBoundsInvariant {
    fn holds(game: &GameStateMachine) -> bool {
        game.current_step < game.history.len()
    }

    fn description() -> &'static str {
        "Current step points into the history"
    }
}
