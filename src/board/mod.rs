//! Board representation.
//!
//! Contains the core data structures for the 8x8 grid, cell coordinates,
//! and the token occupying each cell.

pub mod grid;
pub mod token;

pub use grid::{Board, Position, BOARD_SIZE, CELL_COUNT};
pub use token::Token;
