//! 7x7 grid state and reactor mutation primitives

use serde::{Deserialize, Serialize};

/// Board side length
pub const SIZE: usize = 7;

/// Total plies per game (both players combined)
pub const TOTAL_MOVES: u32 = 14;

/// Orthogonal direction vectors (dr, dc)
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The two sides of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Bot,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Bot,
            Player::Bot => Player::Human,
        }
    }
}

/// Grid coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the board
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && (self.row as usize) < SIZE && self.col >= 0 && (self.col as usize) < SIZE
    }

    /// In-bounds orthogonal neighbors
    pub fn neighbors(&self) -> impl Iterator<Item = Cell> {
        let Cell { row, col } = *self;
        DIRECTIONS
            .iter()
            .map(move |&(dr, dc)| Cell::new(row + dr, col + dc))
            .filter(|c| c.is_valid())
    }

    /// Check if this cell lies in the central 3x3 sub-grid
    pub fn is_central(&self) -> bool {
        (2..=4).contains(&self.row) && (2..=4).contains(&self.col)
    }
}

/// Board: cell ownership plus sticky reactor marks.
///
/// Invariant: a reactor-marked cell is always owned. Ownership itself is not
/// sticky; an adjacent enemy reactor flips it.
#[derive(Clone, Debug)]
pub struct Board {
    owners: [[Option<Player>; SIZE]; SIZE],
    reactors: [[bool; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            owners: [[None; SIZE]; SIZE],
            reactors: [[false; SIZE]; SIZE],
        }
    }

    /// Owner of a cell (must be in bounds)
    pub fn owner(&self, cell: Cell) -> Option<Player> {
        self.owners[cell.row as usize][cell.col as usize]
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.owner(cell).is_none()
    }

    pub fn has_reactor(&self, cell: Cell) -> bool {
        self.reactors[cell.row as usize][cell.col as usize]
    }

    /// Place a reactor: mark the cell, claim it, and flip the ownership of
    /// every in-bounds orthogonal neighbor. Neighbor reactor marks are left
    /// alone. Returns how many cells actually changed owner (1 to 5).
    pub fn activate_reactor(&mut self, cell: Cell, player: Player) -> u32 {
        let mut changed = 0;
        self.reactors[cell.row as usize][cell.col as usize] = true;
        changed += self.claim(cell, player);
        for neighbor in cell.neighbors() {
            changed += self.claim(neighbor, player);
        }
        changed
    }

    fn claim(&mut self, cell: Cell, player: Player) -> u32 {
        let slot = &mut self.owners[cell.row as usize][cell.col as usize];
        if *slot == Some(player) {
            return 0;
        }
        *slot = Some(player);
        1
    }

    /// Count cells owned by a player
    pub fn count_owned(&self, player: Player) -> u32 {
        self.owners
            .iter()
            .flatten()
            .filter(|&&owner| owner == Some(player))
            .count() as u32
    }

    /// All cells on the board, row-major
    pub fn cells() -> impl Iterator<Item = Cell> {
        (0..SIZE as i8).flat_map(|row| (0..SIZE as i8).map(move |col| Cell::new(row, col)))
    }

    /// Unowned cells, row-major
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Self::cells().filter(|&cell| self.is_empty(cell))
    }
}
