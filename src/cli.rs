//! Command-line interface for timetravel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Timetravel - tic-tac-toe with a move history you can jump through
#[derive(Parser, Debug)]
#[command(name = "timetravel")]
#[command(about = "Tic-tac-toe with time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play,

    /// Replay a sequence of 0-based cells and print the result
    ///
    /// Cells are numbered 0-8 here, as in the HTTP API, while `play` takes
    /// 1-9. `replay 0 4 8` is the same game as typing 1, 5, 9 in `play`.
    Replay {
        /// Cells to play in order, 0-based (0=top-left, 8=bottom-right)
        #[arg(required = true, value_name = "CELL_0_TO_8")]
        cells: Vec<usize>,

        /// History step to show after replaying
        #[arg(long)]
        jump: Option<usize>,

        /// List history newest first
        #[arg(long)]
        descending: bool,

        /// Print the JSON snapshot instead of the board
        #[arg(long)]
        json: bool,
    },

    /// Run the session HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from([
            "timetravel", "replay", "0", "4", "1", "--jump", "1", "--descending",
        ]);
        match cli.command {
            Command::Replay {
                cells,
                jump,
                descending,
                json,
            } => {
                assert_eq!(cells, vec![0, 4, 1]);
                assert_eq!(jump, Some(1));
                assert!(descending);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["timetravel", "serve", "--config", "game.toml", "-p", "9000"]);
        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
        assert!(matches!(cli.command, Command::Serve { port: Some(9000), host: None }));
    }

    #[test]
    fn test_replay_help_names_numbering() {
        use clap::CommandFactory;
        let mut cli = Cli::command();
        let replay = cli.find_subcommand_mut("replay").unwrap();
        let help = replay.render_long_help().to_string();
        assert!(help.contains("0-based"));
        assert!(help.contains("`play` takes"));
        assert!(help.contains("CELL_0_TO_8"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
