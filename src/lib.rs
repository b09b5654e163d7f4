//! Timetravel tic-tac-toe - terminal play, replays and a session server
//!
//! The game itself lives in `timetravel_core`; the HTTP session API in
//! `timetravel_server`. This crate wires both to a command line.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with `PORT` and command-line overrides
//! - **Terminal**: line-based renderer driving one game over stdin/stdout
//! - **CLI**: `play`, `replay` and `serve` subcommands
//!
//! # Example
//!
//! ```
//! use timetravel_tictactoe::{Marks, render_board};
//! use timetravel_core::GameStateMachine;
//!
//! let game = GameStateMachine::replay(&[4]).unwrap();
//! assert!(render_board(&game, &Marks::default()).contains(" X "));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod terminal;

pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE, DisplayConfig, ServerConfig};
pub use terminal::{
    Command, CommandParseError, Marks, render_board, render_history, run, status_line,
};
