//! Board rules: flip computation, legality, and move application.
//!
//! All functions here are pure: they take a board snapshot by reference
//! and return fresh values. Coordinates are assumed in-range; out-of-range
//! inputs are a caller contract violation.

use crate::board::{Board, Position, Token, BOARD_SIZE};

/// The eight compass directions in the canonical walk order.
///
/// The order is not semantically significant but must stay fixed so
/// flip sets are reproducible.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns the token at (x, y) if the coordinates are on the board.
#[inline]
fn at(board: &Board, x: isize, y: isize) -> Option<Token> {
    if (0..BOARD_SIZE as isize).contains(&x) && (0..BOARD_SIZE as isize).contains(&y) {
        Some(board.get(x as usize, y as usize))
    } else {
        None
    }
}

/// Collects the run of opposing tokens flipped along one direction,
/// or an empty run if the line is not sandwiched by `token`.
fn flipped_line(board: &Board, x: usize, y: usize, token: Token, dx: isize, dy: isize) -> Vec<Position> {
    let reversed = token.reversed();
    let mut line = Vec::new();
    let (mut tx, mut ty) = (x as isize + dx, y as isize + dy);

    while at(board, tx, ty) == Some(reversed) {
        line.push(Position::new(tx as usize, ty as usize));
        tx += dx;
        ty += dy;
    }
    if at(board, tx, ty) != Some(token) {
        line.clear();
    }
    line
}

/// Returns every cell overturned by placing `token` at (x, y).
///
/// Walks outward in each of the eight directions, keeping a run of
/// opposing tokens only when the cell beyond it holds `token`. An empty
/// result means the placement flips nothing and is therefore illegal.
pub fn flip_set_for(board: &Board, x: usize, y: usize, token: Token) -> Vec<Position> {
    let mut flips = Vec::new();
    for (dx, dy) in DIRECTIONS {
        flips.extend(flipped_line(board, x, y, token, dx, dy));
    }
    flips
}

/// Returns true if `token` may legally be placed at (x, y): the cell is
/// empty and at least one opposing run is sandwiched.
pub fn can_place(board: &Board, x: usize, y: usize, token: Token) -> bool {
    board.get(x, y) == Token::Empty && !flip_set_for(board, x, y, token).is_empty()
}

/// Returns the board after placing `token` at (x, y) and overturning
/// its flip set.
///
/// An illegal placement returns an unchanged copy rather than an error;
/// this permissive contract lets callers probe moves speculatively.
pub fn apply_move(board: &Board, x: usize, y: usize, token: Token) -> Board {
    let mut next = *board;
    if !can_place(board, x, y, token) {
        return next;
    }

    next.set(x, y, token);
    for flip in flip_set_for(board, x, y, token) {
        next.set(flip.x, flip.y, token);
    }
    next
}

/// Returns true if `token` has at least one legal placement.
///
/// Scans in row-major order and short-circuits on the first hit.
pub fn has_any_legal_move(board: &Board, token: Token) -> bool {
    Board::positions().any(|p| can_place(board, p.x, p.y, token))
}

/// Returns every legal placement for `token` in row-major order.
pub fn legal_moves(board: &Board, token: Token) -> Vec<Position> {
    Board::positions()
        .filter(|p| can_place(board, p.x, p.y, token))
        .collect()
}
