//! Line-based terminal renderer.
//!
//! Reads one command per line, applies it to a [`GameStateMachine`] and
//! redraws the board. Rejected commands are printed and the game carries on.

use crate::config::DisplayConfig;
use derive_more::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;
use timetravel_core::{
    CELL_COUNT, Cell, DisplayOrder, DisplayStatus, GameStateMachine, Player, Position, render,
};
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  1-9, move N   play cell N (1=top-left, 9=bottom-right)
  move LABEL    play a cell by name, e.g. `move center`
  jump K, j K   show history step K (0 = game start)
  sort, s       toggle history order
  history, h    list history
  help          show this help
  quit, q       leave";

/// A parsed terminal command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a 0-based cell.
    Move(usize),
    /// Jump to a history step.
    Jump(usize),
    /// Toggle history order.
    Sort,
    /// Print the history list.
    History,
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandParseError {
    /// Blank line.
    #[display("Empty command")]
    Empty,
    /// Unrecognised verb.
    #[display("Unknown command '{_0}' (type `help`)")]
    Unknown(String),
    /// Verb given without its argument.
    #[display("`{_0}` needs an argument")]
    MissingArgument(&'static str),
    /// Argument is not a usable number or cell name.
    #[display("Invalid argument '{_0}'")]
    InvalidArgument(String),
    /// Cell number outside 1-9.
    #[display("Cell {_0} is off the board (use 1-9)")]
    CellOutOfRange(usize),
}

impl std::error::Error for CommandParseError {}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandParseError::Empty)?;
        let arg = words.next();

        match verb.to_lowercase().as_str() {
            "move" | "m" => parse_cell(arg.ok_or(CommandParseError::MissingArgument("move"))?),
            "jump" | "j" => {
                let arg = arg.ok_or(CommandParseError::MissingArgument("jump"))?;
                arg.parse()
                    .map(Command::Jump)
                    .map_err(|_| CommandParseError::InvalidArgument(arg.to_string()))
            }
            "sort" | "s" => Ok(Command::Sort),
            "history" | "h" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ if verb.chars().all(|c| c.is_ascii_digit()) => parse_cell(verb),
            _ => Err(CommandParseError::Unknown(verb.to_string())),
        }
    }
}

/// Parses a 1-based cell number or a cell label.
fn parse_cell(arg: &str) -> Result<Command, CommandParseError> {
    match arg.parse::<usize>() {
        Ok(number @ 1..=CELL_COUNT) => Ok(Command::Move(number - 1)),
        Ok(number) => Err(CommandParseError::CellOutOfRange(number)),
        Err(_) => Position::from_label_or_number(arg)
            .map(|pos| Command::Move(pos.to_index()))
            .ok_or_else(|| CommandParseError::InvalidArgument(arg.to_string())),
    }
}

/// Marks drawn for each player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marks {
    x: String,
    o: String,
}

impl Marks {
    /// Creates marks for X and O.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    fn of(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

impl Default for Marks {
    fn default() -> Self {
        Self::new("X", "O")
    }
}

impl From<&DisplayConfig> for Marks {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(config.x_mark().as_str(), config.o_mark().as_str())
    }
}

/// Status line with the configured marks in place of player names.
pub fn status_line(game: &GameStateMachine, marks: &Marks) -> String {
    match game.status() {
        DisplayStatus::Winner { player, .. } => format!("Winner: {}", marks.of(player)),
        DisplayStatus::Draw => "Draw".to_string(),
        DisplayStatus::NextPlayer { player } => format!("Next player: {}", marks.of(player)),
    }
}

/// Draws the current board and status line.
///
/// Empty cells show their 1-based number; winning cells are bracketed.
pub fn render_board(game: &GameStateMachine, marks: &Marks) -> String {
    let grid = render::grid(game.board(), &game.winner());
    let rows: Vec<String> = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|view| {
                    let text = match view.cell {
                        Cell::Occupied(player) => marks.of(player).to_string(),
                        Cell::Empty => (view.position.to_index() + 1).to_string(),
                    };
                    if view.highlighted {
                        format!("[{}]", text)
                    } else {
                        format!(" {} ", text)
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    format!("{}\n{}\n", rows.join("\n---+---+---\n"), status_line(game, marks))
}

/// Lists history in display order, marking the current step with `>`.
pub fn render_history(game: &GameStateMachine) -> String {
    let order = match game.display_order() {
        DisplayOrder::Ascending => "oldest first",
        DisplayOrder::Descending => "newest first",
    };
    let mut out = format!("History ({}):\n", order);
    for entry in game.history_entries() {
        let marker = if entry.is_current { '>' } else { ' ' };
        out.push_str(&format!("{} {:>2}. {}\n", marker, entry.step, entry));
    }
    out
}

/// Runs the command loop until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(
    game: &mut GameStateMachine,
    input: R,
    output: &mut W,
    marks: &Marks,
) -> std::io::Result<()> {
    info!("Starting terminal game");
    writeln!(output, "Type `help` for commands.")?;
    write!(output, "{}", render_board(game, marks))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Terminal command");

        match command {
            Command::Move(cell) => match game.apply_move(cell) {
                Ok(_) => write!(output, "{}", render_board(game, marks))?,
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Jump(step) => match game.jump_to(step) {
                Ok(()) => {
                    write!(output, "{}", render_board(game, marks))?;
                    write!(output, "{}", render_history(game))?;
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Sort => {
                game.toggle_sort_order();
                write!(output, "{}", render_history(game))?;
            }
            Command::History => write!(output, "{}", render_history(game))?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    info!(step = game.current_step(), "Terminal game finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("5".parse::<Command>(), Ok(Command::Move(4)));
        assert_eq!("move 9".parse::<Command>(), Ok(Command::Move(8)));
        assert_eq!("move Center".parse::<Command>(), Ok(Command::Move(4)));
        assert_eq!("j 3".parse::<Command>(), Ok(Command::Jump(3)));
        assert_eq!("SORT".parse::<Command>(), Ok(Command::Sort));
        assert_eq!("h".parse::<Command>(), Ok(Command::History));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!("0".parse::<Command>(), Err(CommandParseError::CellOutOfRange(0)));
        assert_eq!("move 10".parse::<Command>(), Err(CommandParseError::CellOutOfRange(10)));
        assert_eq!("move nowhere".parse::<Command>(), Err(CommandParseError::InvalidArgument("nowhere".into())));
        assert_eq!("jump".parse::<Command>(), Err(CommandParseError::MissingArgument("jump")));
        assert_eq!("jump x".parse::<Command>(), Err(CommandParseError::InvalidArgument("x".into())));
        assert!(matches!("dance".parse::<Command>(), Err(CommandParseError::Unknown(_))));
    }

    #[test]
    fn test_render_empty_board() {
        let game = GameStateMachine::new();
        let expected = " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 \nNext player: X\n";
        assert_eq!(render_board(&game, &Marks::default()), expected);
    }

    #[test]
    fn test_render_brackets_winning_line() {
        let game = GameStateMachine::replay(&[0, 4, 1, 7, 2]).unwrap();
        let board = render_board(&game, &Marks::new("x", "o"));
        assert!(board.starts_with("[x]|[x]|[x]\n"));
        assert!(board.ends_with("Winner: x\n"));
    }

    #[test]
    fn test_status_line_uses_marks() {
        let marks = Marks::new("#", "@");
        let mut game = GameStateMachine::replay(&[4]).unwrap();
        assert_eq!(status_line(&game, &marks), "Next player: @");
        game.jump_to(0).unwrap();
        assert_eq!(status_line(&game, &marks), "Next player: #");
        let drawn = GameStateMachine::replay(&[0, 1, 2, 4, 3, 5, 7, 6, 8]).unwrap();
        assert_eq!(status_line(&drawn, &marks), "Draw");
    }

    #[test]
    fn test_render_history_marks_current() {
        let mut game = GameStateMachine::replay(&[4, 0]).unwrap();
        game.jump_to(1).unwrap();
        let history = render_history(&game);
        assert!(history.contains(">  1. Move #1: (2, 2)"));
        assert!(history.contains("   0. Game start"));
    }
}
