//! Timetravel - unified CLI
//!
//! Plays tic-tac-toe in the terminal, replays move lists, or serves game
//! sessions over HTTP.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use timetravel_core::GameStateMachine;
use timetravel_server::SessionManager;
use timetravel_tictactoe::cli::{Cli, Command};
use timetravel_tictactoe::{AppConfig, Marks, render_board, render_history};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config)?;
    init_tracing(&config);
    config.apply_env_overrides();

    match cli.command {
        Command::Play => run_play(&config),
        Command::Replay {
            cells,
            jump,
            descending,
            json,
        } => run_replay(&config, &cells, jump, descending, json),
        Command::Serve { host, port } => {
            config.override_server(host, port);
            run_server(&config).await
        }
    }
}

/// Initialize tracing on stderr; `RUST_LOG` beats the configured filter.
fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run one interactive game over stdin/stdout
#[instrument(skip_all)]
fn run_play(config: &AppConfig) -> Result<()> {
    let marks = Marks::from(config.display());
    let mut game = GameStateMachine::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    timetravel_tictactoe::run(&mut game, stdin.lock(), &mut stdout, &marks)?;
    Ok(())
}

/// Replay a move list and print the final state
#[instrument(skip(config))]
fn run_replay(
    config: &AppConfig,
    cells: &[usize],
    jump: Option<usize>,
    descending: bool,
    json: bool,
) -> Result<()> {
    let mut game = GameStateMachine::replay(cells)?;
    if let Some(step) = jump {
        game.jump_to(step)?;
    }
    if descending {
        game.toggle_sort_order();
    }
    info!(step = game.current_step(), "Replay finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    } else {
        print!("{}", render_board(&game, &Marks::from(config.display())));
        print!("{}", render_history(&game));
    }
    Ok(())
}

/// Run the session HTTP server
#[instrument(skip_all)]
async fn run_server(config: &AppConfig) -> Result<()> {
    let server = config.server();
    info!(host = %server.host(), port = server.port(), "Starting session server");

    let listener = tokio::net::TcpListener::bind((server.host().as_str(), *server.port())).await?;
    timetravel_server::serve(listener, SessionManager::new()).await?;

    Ok(())
}
