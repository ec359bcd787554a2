//! The 8x8 board grid.
//!
//! The board is a fixed row-major array of tokens with the origin at the
//! top-left corner. It is a plain `Copy` value: rules and search functions
//! take a snapshot and return a new board, never mutating the caller's copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::Token;

/// Board side length in cells.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell coordinate: `x` counts columns from the left, `y` rows from
/// the top. Both are in `[0, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An 8x8 board of tokens.
///
/// Uses a fixed-size row-major array indexed `[y][x]` for O(1) lookup.
/// This avoids heap allocation and makes the board trivially copyable,
/// which keeps move simulation in search cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Token; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn empty() -> Self {
        Board {
            cells: [[Token::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the standard opening layout: Black at (3,3) and (4,4),
    /// White at (4,3) and (3,4), all other cells empty.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        board.set(3, 3, Token::Black);
        board.set(4, 4, Token::Black);
        board.set(4, 3, Token::White);
        board.set(3, 4, Token::White);
        board
    }

    /// Returns the token at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Token {
        self.cells[y][x]
    }

    /// Sets the token at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, token: Token) {
        self.cells[y][x] = token;
    }

    /// Counts the cells holding the given token.
    pub fn score_for(&self, token: Token) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == token)
            .count() as u32
    }

    /// Counts the unoccupied cells.
    pub fn count_empty(&self) -> u32 {
        self.score_for(Token::Empty)
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Token::Empty)
    }

    /// Iterates over all cell coordinates in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                write!(f, "{}", self.get(x, y).display_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
