//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! history handling so the state machine and its contracts can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Win, WinResult, WINNING_LINES, evaluate};
