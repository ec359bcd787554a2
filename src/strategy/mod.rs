//! Player strategies.
//!
//! Each side of a game is bound to one policy from a closed set. All
//! policies answer the same `choose_move` contract; only the non-human
//! ones ever compute a move. The session checks the bound policy before
//! delegating, so asking a human binding to compute is a programming
//! error, not a runtime condition.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, Token, BOARD_SIZE};
use crate::eval::PLACEMENT_WEIGHTS;
use crate::rules::{can_place, has_any_legal_move, legal_moves};
use crate::search::search;

/// Lookahead depth for the deep minimax policy.
pub const MINMAX_DEPTH: u32 = 5;

/// Lookahead depth for the shallow lookahead policy.
pub const SHALLOW_DEPTH: u32 = 1;

/// The closed set of decision policies a side can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Moves arrive from outside the engine; never computes.
    Human,
    /// Uniform choice among the legal cells.
    RandomAi,
    /// Greedy choice by static placement weight.
    WeightedAi,
    /// One-ply negamax lookahead.
    ShallowLookaheadAi,
    /// Deep negamax lookahead.
    MinMaxAi,
}

/// Errors raised by the strategy layer.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// A human-bound strategy was asked to compute a move. The session
    /// contract forbids this; treat it as a fatal programming error.
    #[error("human-bound strategy for {0:?} asked to compute a move")]
    InvalidStrategyInvocation(Token),
}

/// Binds a side to a decision policy.
///
/// Replacing a side's strategy discards the old instance with no
/// residual effect; the RNG state is not carried over.
pub struct Strategy {
    token: Token,
    policy: Policy,
    rng: SmallRng,
}

impl Strategy {
    /// Creates a strategy binding with an entropy-seeded RNG.
    pub fn new(token: Token, policy: Policy) -> Self {
        Strategy {
            token,
            policy,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a strategy with a fixed RNG seed, for reproducible play.
    pub fn seeded(token: Token, policy: Policy, seed: u64) -> Self {
        Strategy {
            token,
            policy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The side this strategy plays.
    pub fn token(&self) -> Token {
        self.token
    }

    /// The bound policy tag.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Computes the side's next move.
    ///
    /// Returns `Ok(None)` when the side has no legal placement (a pass,
    /// distinct from any playable cell). Human bindings cannot compute
    /// and return an error instead.
    pub fn choose_move(&mut self, board: &Board) -> Result<Option<Position>, StrategyError> {
        if !has_any_legal_move(board, self.token) {
            return Ok(None);
        }

        let chosen = match self.policy {
            Policy::Human => {
                return Err(StrategyError::InvalidStrategyInvocation(self.token));
            }
            Policy::RandomAi => Some(self.random_move(board)),
            Policy::WeightedAi => Self::weighted_move(board, self.token),
            Policy::ShallowLookaheadAi => search(board, self.token, SHALLOW_DEPTH).best_move,
            Policy::MinMaxAi => search(board, self.token, MINMAX_DEPTH).best_move,
        };
        Ok(chosen)
    }

    /// Uniform choice among the legal cells. Enumerates rather than
    /// rejection-samples so the decision takes bounded time.
    fn random_move(&mut self, board: &Board) -> Position {
        let moves = legal_moves(board, self.token);
        moves[self.rng.gen_range(0..moves.len())]
    }

    /// Scans the placement table in row-major order and keeps the legal
    /// cell with the strictly greatest static weight; ties keep the
    /// first cell found.
    fn weighted_move(board: &Board, token: Token) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if !can_place(board, x, y, token) {
                    continue;
                }
                let weight = PLACEMENT_WEIGHTS[y][x];
                if best.map_or(true, |(_, w)| weight > w) {
                    best = Some((Position::new(x, y), weight));
                }
            }
        }
        best.map(|(pos, _)| pos)
    }
}
