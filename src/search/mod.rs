//! Fixed-depth negamax search.
//!
//! Explores every reachable board to a bounded ply depth, scoring leaves
//! with the static evaluator. The zero-sum property lets each recursion
//! negate the child's score instead of tracking separate maximizing and
//! minimizing branches.

pub mod worker;

use rayon::prelude::*;

use crate::board::{Board, Position, Token};
use crate::eval::evaluate;
use crate::rules::{apply_move, legal_moves};

pub use worker::{SearchTicket, SearchWorker};

/// Minimum remaining depth at which root moves are scored in parallel.
/// Shallow trees are cheaper to walk than to fan out.
const PARALLEL_ROOT_DEPTH: u32 = 3;

/// The outcome of a search: the chosen move, if any, and its score from
/// the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Position>,
    pub score: i32,
}

/// Searches `depth` plies ahead for the best move available to `token`.
///
/// Candidate moves are enumerated in row-major order and ties keep the
/// first move found, so the chosen move is reproducible. When the side
/// to move has no legal placement the position is scored statically
/// with no move attached; the pass is not searched further.
pub fn search(board: &Board, token: Token, depth: u32) -> SearchOutcome {
    if depth == 0 {
        return SearchOutcome {
            best_move: None,
            score: evaluate(board, token),
        };
    }

    let moves = legal_moves(board, token);
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: evaluate(board, token),
        };
    }

    let score_child = |mv: &Position| {
        let next = apply_move(board, mv.x, mv.y, token);
        -negamax(&next, token.reversed(), depth - 1)
    };

    // Root-level fan-out only; the tie-break below is order-dependent,
    // so scores are collected positionally before the sequential argmax.
    let scores: Vec<i32> = if depth >= PARALLEL_ROOT_DEPTH && moves.len() > 1 {
        moves.par_iter().map(score_child).collect()
    } else {
        moves.iter().map(score_child).collect()
    };

    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }

    SearchOutcome {
        best_move: Some(moves[best]),
        score: scores[best],
    }
}

/// Scores a position for `token` with `depth` plies of lookahead,
/// without tracking which move achieves it.
fn negamax(board: &Board, token: Token, depth: u32) -> i32 {
    if depth == 0 {
        return evaluate(board, token);
    }

    let moves = legal_moves(board, token);
    if moves.is_empty() {
        // Forced pass: score the unchanged position from the mover's
        // perspective rather than handing the turn back in the tree.
        return evaluate(board, token);
    }

    let mut best = None;
    for mv in moves {
        let next = apply_move(board, mv.x, mv.y, token);
        let score = -negamax(&next, token.reversed(), depth - 1);
        if best.map_or(true, |b| score > b) {
            best = Some(score);
        }
    }
    best.unwrap_or_else(|| evaluate(board, token))
}
