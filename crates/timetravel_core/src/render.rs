//! Pure projection of a board into rows for a renderer.

use crate::{Board, Cell, Position, WinResult};
use serde::Serialize;

/// One cell as a renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Where the cell is.
    pub position: Position,
    /// What is in it.
    pub cell: Cell,
    /// Part of the winning line.
    pub highlighted: bool,
}

/// Three rows of three.
pub type Grid<T> = [[T; 3]; 3];

/// Splits the board into rows, top row first.
pub fn rows(board: &Board) -> Grid<Cell> {
    let cells = board.cells();
    std::array::from_fn(|row| std::array::from_fn(|col| cells[row * 3 + col]))
}

/// Rows of cell views with the winning line highlighted.
pub fn grid(board: &Board, win: &WinResult) -> Grid<CellView> {
    std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            let position = Position::ALL[row * 3 + col];
            CellView {
                position,
                cell: board.get(position),
                highlighted: win.is_some_and(|w| w.contains(position)),
            }
        })
    })
}
