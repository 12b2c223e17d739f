//! Board representation and wholesale reconciliation from the tile list.

use serde::{Deserialize, Serialize};

/// Player symbol. `X` is always the first mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// First mover.
    X,
    /// Second mover.
    O,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// No stone here.
    Empty,
    /// A stone placed by the given symbol.
    Occupied(Symbol),
}

/// A stone on the board, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// Column, counted from the left.
    pub x: u16,
    /// Row, counted from the top.
    pub y: u16,
    /// Which symbol placed the stone.
    pub symbol: Symbol,
}

/// Dense occupancy grid, addressed by linear index `y * width + x`.
///
/// The grid is never patched incrementally: every update rebuilds it from
/// the service's full tile list via [`Board::reconcile`], so the client
/// cannot accumulate drift from missed or reordered updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Builds a board from the authoritative tile list.
    ///
    /// Pure and idempotent: the same tile list always yields the same
    /// board, regardless of any prior state. Tiles outside the grid are
    /// skipped.
    pub fn reconcile(width: u16, height: u16, tiles: &[PlacedTile]) -> Self {
        let mut board = Self::new(width, height);
        for tile in tiles {
            if tile.x < width && tile.y < height {
                let index = board.index_of(tile.x, tile.y);
                board.cells[index] = Cell::Occupied(tile.symbol);
            }
        }
        board
    }

    /// Board width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at the given linear index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// True when the cell exists and holds no stone.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Linear index of the cell at `(x, y)`.
    pub fn index_of(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Coordinates of the cell at the given linear index.
    pub fn coords_of(&self, index: usize) -> (u16, u16) {
        (
            (index % self.width as usize) as u16,
            (index / self.width as usize) as u16,
        )
    }
}
