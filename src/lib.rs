//! Kuroshiro engine library.
//!
//! Exposes the board representation, placement rules, evaluation,
//! negamax search, player strategies, and the game session state machine
//! for use by integration tests and the binary entry point.

pub mod board;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod strategy;
