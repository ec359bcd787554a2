//! Static position evaluation.
//!
//! Scores a board from one side's perspective using a fixed positional
//! weight table. Corners are worth the most because they can never be
//! flipped once taken; the cells adjacent to a corner are penalized
//! because occupying them hands the corner to the opponent.

use crate::board::{Board, Token, BOARD_SIZE};

/// Positional weights used by the search evaluator, indexed `[y][x]`.
pub const EVAL_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

/// Positional weights used by the greedy placement policy, indexed
/// `[y][x]`. A separate, all-nonpositive table: the greedy player only
/// ranks candidate cells against each other, so relative order is what
/// matters.
pub const PLACEMENT_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [-30, -12, 0, -1, -1, 0, -12, -30],
    [-12, -15, -3, -3, -3, -3, -15, -12],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-12, -15, -3, -3, -3, -3, -15, -12],
    [-30, -12, 0, -1, -1, 0, -12, -30],
];

/// Multiplier applied to the raw disc count on a full board. Large
/// enough that occupancy dominates any positional sum.
const FULL_BOARD_DISC_VALUE: i32 = 10_000;

/// Evaluates a board from `token`'s perspective.
///
/// On a full board the game is decided by occupancy alone, so the
/// positional table is ignored and the disc count is scaled up instead.
/// Otherwise returns the weighted sum over `token`'s cells minus the
/// weighted sum over the opponent's cells.
pub fn evaluate(board: &Board, token: Token) -> i32 {
    if board.is_full() {
        return board.score_for(token) as i32 * FULL_BOARD_DISC_VALUE;
    }

    let reversed = token.reversed();
    let mut score = 0;
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let cell = board.get(x, y);
            if cell == token {
                score += EVAL_WEIGHTS[y][x];
            } else if cell == reversed {
                score -= EVAL_WEIGHTS[y][x];
            }
        }
    }
    score
}
