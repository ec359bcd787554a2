//! Cell occupancy tokens.
//!
//! Every cell on the board holds exactly one `Token`. Black and White
//! are the two playing sides; Empty marks an unoccupied cell.

use serde::{Deserialize, Serialize};

/// The occupant of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Empty,
    Black,
    White,
}

impl Token {
    /// Returns the opposite playing side.
    ///
    /// Only meaningful for Black and White; callers never pass Empty,
    /// which falls through to Black.
    pub const fn reversed(self) -> Token {
        match self {
            Token::Black => Token::White,
            _ => Token::Black,
        }
    }

    /// Returns the single-character abbreviation used in board rendering.
    pub const fn display_char(self) -> char {
        match self {
            Token::Empty => '.',
            Token::Black => 'B',
            Token::White => 'W',
        }
    }
}
