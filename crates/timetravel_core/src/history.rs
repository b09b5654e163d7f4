//! Board snapshots and the time-travel history.

use crate::{Board, Location, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A board snapshot together with the play that produced it.
///
/// The synthetic first move has an empty board and no position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Board after the play.
    pub squares: Board,
    /// Where the play happened.
    pub position: Option<Position>,
}

impl Move {
    /// The synthetic game-start move.
    pub fn initial() -> Self {
        Self {
            squares: Board::new(),
            position: None,
        }
    }

    /// Location of the play, if any.
    pub fn location(&self) -> Option<Location> {
        self.position.map(Position::location)
    }

    /// Player who made the play, read off the board.
    pub fn player(&self) -> Option<Player> {
        self.position.and_then(|pos| self.squares.get(pos).player())
    }
}

/// Ordered sequence of moves, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    pub(crate) moves: Vec<Move>,
}

impl History {
    /// History holding only the game-start move.
    pub fn new() -> Self {
        Self {
            moves: vec![Move::initial()],
        }
    }

    /// Number of snapshots, including the initial one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Snapshot at a step.
    pub fn get(&self, step: usize) -> Option<&Move> {
        self.moves.get(step)
    }

    /// Most recent snapshot.
    pub fn last(&self) -> &Move {
        // The initial move is never removed.
        &self.moves[self.moves.len() - 1]
    }

    /// Iterates snapshots from game start.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// All snapshots as a slice.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Drops every snapshot after `step`, then appends `next`.
    ///
    /// Returns the index of the appended snapshot.
    #[instrument(skip(self, next), fields(len = self.moves.len()))]
    pub(crate) fn branch(&mut self, step: usize, next: Move) -> usize {
        self.moves.truncate(step + 1);
        self.moves.push(next);
        self.moves.len() - 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Order in which the history list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayOrder {
    /// Game start first.
    #[default]
    Ascending,
    /// Latest move first.
    Descending,
}

impl DisplayOrder {
    /// The other order.
    pub fn toggle(self) -> Self {
        match self {
            DisplayOrder::Ascending => DisplayOrder::Descending,
            DisplayOrder::Descending => DisplayOrder::Ascending,
        }
    }
}

/// One line of the rendered history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Step this entry jumps to.
    pub step: usize,
    /// Cell played, `None` for game start.
    pub position: Option<Position>,
    /// Column and row played.
    pub location: Option<Location>,
    /// Who played.
    pub player: Option<Player>,
    /// Whether this is the step currently shown.
    pub is_current: bool,
}

impl HistoryEntry {
    pub(crate) fn from_move(step: usize, mv: &Move, current_step: usize) -> Self {
        Self {
            step,
            position: mv.position,
            location: mv.location(),
            player: mv.player(),
            is_current: step == current_step,
        }
    }

    /// Button label: `Game start` or `Move #3: (2, 1)`.
    pub fn label(&self) -> String {
        match self.location {
            Some(location) => format!("Move #{}: {}", self.step, location),
            None => "Game start".to_string(),
        }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
