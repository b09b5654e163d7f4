//! Contract-based validation for state machine transitions.
//!
//! Contracts define correctness through preconditions and postconditions,
//! in the Hoare style `{P} action {Q}`. Preconditions always run;
//! postconditions run in debug builds.

use crate::invariants::{InvariantSet, TimeTravelInvariants};
use crate::machine::GameStateMachine;
use crate::{CELL_COUNT, GameError, IndexTarget, Position, rules};
use tracing::instrument;

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell index addresses the board.
pub struct CellInBounds;

impl CellInBounds {
    /// Resolves the index to a position.
    #[instrument]
    pub fn check(cell: usize) -> Result<Position, GameError> {
        Position::from_index(cell).ok_or(GameError::InvalidIndex {
            target: IndexTarget::Cell,
            index: cell,
            limit: CELL_COUNT,
        })
    }
}

/// Precondition: no winning line on the current board.
pub struct GameUndecided;

impl GameUndecided {
    /// Fails with the winner when the current board has a line.
    #[instrument(skip(game))]
    pub fn check(game: &GameStateMachine) -> Result<(), GameError> {
        match rules::evaluate(game.board()) {
            Some(win) => Err(GameError::GameAlreadyDecided(win.player)),
            None => Ok(()),
        }
    }
}

/// Precondition: the target cell is empty on the current board.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails when the position is already marked.
    #[instrument(skip(game))]
    pub fn check(position: Position, game: &GameStateMachine) -> Result<(), GameError> {
        if game.board().is_empty(position) {
            Ok(())
        } else {
            Err(GameError::CellOccupied(position))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move contract
// ─────────────────────────────────────────────────────────────

/// Contract for playing a cell.
///
/// Preconditions:
/// - Game not decided
/// - Cell empty
///
/// Postconditions:
/// - All state invariants hold
/// - History kept the snapshots up to the old step and gained exactly one
/// - The new snapshot is current
pub struct MoveContract;

impl Contract<GameStateMachine, Position> for MoveContract {
    fn pre(game: &GameStateMachine, position: &Position) -> Result<(), GameError> {
        GameUndecided::check(game)?;
        CellIsEmpty::check(*position, game)
    }

    fn post(before: &GameStateMachine, after: &GameStateMachine) -> Result<(), GameError> {
        check_invariants(after)?;

        let kept = before.current_step + 1;
        let history = after.history.as_slice();
        let branched = history.len() == kept + 1
            && history[..kept] == before.history.as_slice()[..kept]
            && after.current_step == kept;
        if branched {
            Ok(())
        } else {
            Err(GameError::InvariantViolation(
                "Postcondition failed: history must branch once from the old step".to_string(),
            ))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Jump contract
// ─────────────────────────────────────────────────────────────

/// Contract for jumping to a past (or future) snapshot.
pub struct JumpContract;

impl Contract<GameStateMachine, usize> for JumpContract {
    fn pre(game: &GameStateMachine, step: &usize) -> Result<(), GameError> {
        let limit = game.history.len();
        if *step < limit {
            Ok(())
        } else {
            Err(GameError::InvalidIndex {
                target: IndexTarget::Step,
                index: *step,
                limit,
            })
        }
    }

    fn post(before: &GameStateMachine, after: &GameStateMachine) -> Result<(), GameError> {
        check_invariants(after)?;
        if before.history == after.history {
            Ok(())
        } else {
            Err(GameError::InvariantViolation(
                "Postcondition failed: jumping must not change history".to_string(),
            ))
        }
    }
}

fn check_invariants(game: &GameStateMachine) -> Result<(), GameError> {
    TimeTravelInvariants::check_all(game).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Player};

    #[test]
    fn test_precondition_empty_cell() {
        let game = GameStateMachine::new();
        assert!(MoveContract::pre(&game, &Position::Center).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let game = GameStateMachine::replay(&[4]).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &Position::Center),
            Err(GameError::CellOccupied(Position::Center))
        );
    }

    #[test]
    fn test_precondition_decided() {
        let game = GameStateMachine::replay(&[0, 4, 1, 7, 2]).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &Position::BottomRight),
            Err(GameError::GameAlreadyDecided(Player::X))
        );
    }

    #[test]
    fn test_cell_bounds() {
        assert_eq!(CellInBounds::check(8), Ok(Position::BottomRight));
        assert!(matches!(
            CellInBounds::check(42),
            Err(GameError::InvalidIndex { index: 42, .. })
        ));
    }

    #[test]
    fn test_jump_precondition() {
        let game = GameStateMachine::replay(&[0, 1]).unwrap();
        assert!(JumpContract::pre(&game, &2).is_ok());
        assert!(JumpContract::pre(&game, &3).is_err());
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameStateMachine::replay(&[0, 4]).unwrap();
        let mut after = before.clone();
        after.apply_move(8).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_lost_history() {
        let before = GameStateMachine::replay(&[0, 4]).unwrap();
        let mut after = before.clone();
        after.apply_move(8).unwrap();
        after.history.moves.remove(1);
        after.current_step = after.history.len() - 1;
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_board_corruption() {
        let before = GameStateMachine::new();
        let mut after = before.clone();
        after.apply_move(4).unwrap();
        after.history.moves[1]
            .squares
            .set(Position::TopLeft, Cell::Occupied(Player::O));
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_jump_postcondition_detects_history_change() {
        let before = GameStateMachine::replay(&[0, 4]).unwrap();
        let mut after = before.clone();
        after.current_step = 1;
        assert!(JumpContract::post(&before, &after).is_ok());
        after.history.moves.truncate(2);
        assert!(JumpContract::post(&before, &after).is_err());
    }
}
