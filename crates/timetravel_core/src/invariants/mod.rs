//! First-class invariants for the time-travel state machine.
//!
//! Invariants are logical properties that must hold after every transition.
//! They are testable independently and document what the machine guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($name:ident),+) => {
        impl<S, $($name),+> InvariantSet<S> for ($($name,)+)
        where
            $($name: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$name::holds(state) {
                        violations.push(InvariantViolation::new($name::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);

pub mod alternating_turn;
pub mod decided_is_final;
pub mod history_consistent;
pub mod initial_snapshot;
pub mod monotonic_board;
pub mod step_in_bounds;

pub use alternating_turn::AlternatingTurnInvariant;
pub use decided_is_final::DecidedIsFinalInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use initial_snapshot::InitialSnapshotInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use step_in_bounds::StepInBoundsInvariant;

/// Every state machine invariant as a composable set.
pub type TimeTravelInvariants = (
    StepInBoundsInvariant,
    InitialSnapshotInvariant,
    MonotonicBoardInvariant,
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
    DecidedIsFinalInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::GameStateMachine;
    use crate::{Cell, Player, Position};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameStateMachine::new();
        assert!(TimeTravelInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_time_travel() {
        let mut game = GameStateMachine::replay(&[0, 4, 1, 7]).unwrap();
        game.jump_to(1).unwrap();
        game.apply_move(8).unwrap();
        assert!(TimeTravelInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = GameStateMachine::replay(&[4]).unwrap();
        game.history.moves[0]
            .squares
            .set(Position::TopLeft, Cell::Occupied(Player::O));
        game.current_step = 5;

        let violations = TimeTravelInvariants::check_all(&game).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&StepInBoundsInvariant::description()));
        assert!(descriptions.contains(&InitialSnapshotInvariant::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&GameStateMachine::new()).is_ok());
    }
}
