//! Tic-tac-toe with a time-travel move history.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw detection over a 9-cell board
//! - **Machine**: history of board snapshots with a movable current step
//! - **Contracts**: pre/postconditions around every transition
//! - **Views**: status, history list, board projection and snapshot
//!
//! # Example
//!
//! ```
//! use timetravel_core::{GameStateMachine, Player};
//!
//! let mut game = GameStateMachine::new();
//! game.apply_move(4).unwrap();
//! game.apply_move(0).unwrap();
//! game.jump_to(1).unwrap();
//! assert_eq!(game.next_player(), Player::O);
//! game.apply_move(8).unwrap();
//! assert_eq!(game.history().len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contracts;
mod error;
mod history;
pub mod invariants;
mod machine;
mod position;
pub mod render;
pub mod rules;
mod snapshot;
mod status;
mod types;

pub use error::{GameError, IndexTarget};
pub use history::{DisplayOrder, History, HistoryEntry, Move};
pub use machine::{GameStateMachine, Placement};
pub use position::{LOCATIONS, Location, Position};
pub use rules::{Win, WinResult, evaluate};
pub use snapshot::GameSnapshot;
pub use status::DisplayStatus;
pub use types::{Board, CELL_COUNT, Cell, Player};
