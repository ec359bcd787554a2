//! Game session state machine.
//!
//! Owns the live board, the turn pointer, and the two strategy bindings,
//! and drives turn advancement, pass detection, and termination. Sessions
//! are plain owned values: any number can run independently. All mutation
//! goes through `start` and `place_token` (plus `poll`/`resolve_pending`
//! for results arriving from the search worker), so state transitions are
//! serialized by Rust's ownership rules.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, Token};
use crate::rules::{apply_move, can_place, has_any_legal_move};
use crate::search::{SearchTicket, SearchWorker};
use crate::strategy::{Policy, Strategy, MINMAX_DEPTH};

/// Observer callback invoked after every state mutation. Content-free:
/// observers re-read the full snapshot.
type Observer = Box<dyn Fn() + Send>;

/// A deep, immutable copy of the session state. Mutating a snapshot
/// never affects the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub running: bool,
    pub board: Board,
    pub next_turn: Token,
    pub winner: Option<Token>,
    pub black: Policy,
    pub white: Policy,
}

/// A live two-player game.
///
/// Defaults to a human playing Black against the deep minimax opponent
/// as White.
pub struct GameSession {
    board: Board,
    next_turn: Token,
    running: bool,
    winner: Option<Token>,
    black: Strategy,
    white: Strategy,
    worker: SearchWorker,
    pending: Option<SearchTicket>,
    observers: Vec<Observer>,
}

impl GameSession {
    /// Creates a session with the default strategy bindings and a
    /// default search worker.
    pub fn new() -> Self {
        GameSession::with_search_worker(SearchWorker::new())
    }

    /// Creates a session using the given search worker, letting callers
    /// pick the latency floor.
    pub fn with_search_worker(worker: SearchWorker) -> Self {
        GameSession {
            board: Board::initial(),
            next_turn: Token::Black,
            running: false,
            winner: None,
            black: Strategy::new(Token::Black, Policy::Human),
            white: Strategy::new(Token::White, Policy::MinMaxAi),
            worker,
            pending: None,
            observers: Vec::new(),
        }
    }

    /// Registers a change observer, called after every `start` and
    /// `place_token` (no-op placements included) and after every move
    /// applied on behalf of a computer player.
    pub fn on_change(&mut self, observer: impl Fn() + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Starts (or restarts) the game from the standard opening layout.
    ///
    /// The turn is seeded with White because the advance procedure swaps
    /// sides first; the swap makes Black the opening mover, and kicks
    /// off Black's strategy if it is a computer player.
    pub fn start(&mut self) {
        self.board = Board::initial();
        self.running = true;
        self.winner = None;
        self.pending = None;
        self.next_turn = Token::White;
        self.advance_turn();
        self.notify();
    }

    /// Places the next token at (x, y).
    ///
    /// Illegal placements are silently ignored: stale requests from a UI
    /// arriving after the turn changed must not corrupt state. Calls
    /// made while a deep search is in flight are ignored for the same
    /// reason. Observers are notified either way.
    pub fn place_token(&mut self, x: usize, y: usize) {
        if self.running && self.pending.is_none() && can_place(&self.board, x, y, self.next_turn) {
            self.board = apply_move(&self.board, x, y, self.next_turn);
            self.advance_turn();
        }
        self.notify();
    }

    /// Replaces the strategy bound to a side, effective from the next
    /// turn-advance. The previous binding is discarded.
    pub fn set_strategy(&mut self, token: Token, policy: Policy) {
        self.bind(Strategy::new(token, policy));
        self.notify();
    }

    /// Replaces a side's strategy with a deterministically seeded one,
    /// for reproducible games.
    pub fn set_seeded_strategy(&mut self, token: Token, policy: Policy, seed: u64) {
        self.bind(Strategy::seeded(token, policy, seed));
        self.notify();
    }

    /// Non-blocking check on an in-flight deep search. Applies the
    /// result and resumes the turn cascade when one is ready. Returns
    /// true if the session made progress.
    pub fn poll(&mut self) -> bool {
        let result = match &self.pending {
            Some(ticket) => match ticket.try_take() {
                Some(result) => result,
                None => return false,
            },
            None => return false,
        };
        self.pending = None;
        self.apply_search_result(result);
        true
    }

    /// Blocks until the in-flight deep search (if any) resolves, then
    /// applies its result and resumes the turn cascade.
    pub fn resolve_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            let result = ticket.take();
            self.apply_search_result(result);
        }
    }

    /// Returns a deep copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            board: self.board,
            next_turn: self.next_turn,
            winner: self.winner,
            black: self.black.policy(),
            white: self.white.policy(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_turn(&self) -> Token {
        self.next_turn
    }

    pub fn winner(&self) -> Option<Token> {
        self.winner
    }

    /// True while a deep search is in flight for the side to move.
    pub fn searching(&self) -> bool {
        self.pending.is_some()
    }

    fn bind(&mut self, strategy: Strategy) {
        match strategy.token() {
            Token::Black => self.black = strategy,
            _ => self.white = strategy,
        }
    }

    fn policy_of(&self, token: Token) -> Policy {
        match token {
            Token::Black => self.black.policy(),
            _ => self.white.policy(),
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer();
        }
    }

    /// Applies a move delivered by the search worker through the same
    /// path as an external placement.
    fn apply_search_result(&mut self, result: Option<Position>) {
        if let Some(pos) = result {
            self.board = apply_move(&self.board, pos.x, pos.y, self.next_turn);
            self.notify();
        }
        self.advance_turn();
    }

    /// Swaps the turn, handling the pass and termination cases.
    ///
    /// If the opponent can move, the turn passes to them. If neither
    /// side can move the game finishes. Otherwise the opponent passes
    /// and the mover keeps the turn.
    fn rotate_turn(&mut self) {
        let other = self.next_turn.reversed();
        if has_any_legal_move(&self.board, other) {
            self.next_turn = other;
        } else if !has_any_legal_move(&self.board, self.next_turn) {
            self.finish();
        }
    }

    /// Ends the game and computes the winner by disc count; equal
    /// counts leave no winner.
    fn finish(&mut self) {
        self.running = false;
        let black = self.board.score_for(Token::Black);
        let white = self.board.score_for(Token::White);
        self.winner = if black > white {
            Some(Token::Black)
        } else if white > black {
            Some(Token::White)
        } else {
            None
        };
    }

    /// Runs the turn-advance procedure, cascading through computer
    /// turns until the game ends, a human must move, or a deep search
    /// is dispatched to the worker.
    fn advance_turn(&mut self) {
        loop {
            self.rotate_turn();
            if !self.running {
                return;
            }
            match self.policy_of(self.next_turn) {
                Policy::Human => return,
                Policy::MinMaxAi => {
                    self.pending =
                        Some(self.worker.submit(self.board, self.next_turn, MINMAX_DEPTH));
                    return;
                }
                _ => {
                    let strategy = match self.next_turn {
                        Token::Black => &mut self.black,
                        _ => &mut self.white,
                    };
                    // The rotation above only hands the turn to a side
                    // with a legal move, so a cheap policy always
                    // produces one here.
                    match strategy.choose_move(&self.board) {
                        Ok(Some(pos)) => {
                            self.board =
                                apply_move(&self.board, pos.x, pos.y, self.next_turn);
                            self.notify();
                        }
                        _ => return,
                    }
                }
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn instant_session() -> GameSession {
        GameSession::with_search_worker(SearchWorker::with_latency_floor(Duration::ZERO))
    }

    /// A session with both sides human, so nothing moves on its own.
    fn manual_session() -> GameSession {
        let mut session = instant_session();
        session.set_strategy(Token::Black, Policy::Human);
        session.set_strategy(Token::White, Policy::Human);
        session
    }

    /// Overwrites the live board for scenario setup.
    fn force_board(session: &mut GameSession, picture: &[&str; 8]) {
        let mut board = Board::empty();
        for (y, row) in picture.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let token = match c {
                    'B' => Token::Black,
                    'W' => Token::White,
                    _ => Token::Empty,
                };
                board.set(x, y, token);
            }
        }
        session.board = board;
    }

    #[test]
    fn new_session_defaults_to_human_vs_minmax() {
        let session = instant_session();
        let snap = session.snapshot();
        assert!(!snap.running);
        assert_eq!(snap.black, Policy::Human);
        assert_eq!(snap.white, Policy::MinMaxAi);
    }

    #[test]
    fn start_resets_to_the_opening_with_black_to_move() {
        let mut session = manual_session();
        session.start();
        let snap = session.snapshot();
        assert!(snap.running);
        assert_eq!(snap.next_turn, Token::Black);
        assert_eq!(snap.winner, None);
        assert_eq!(snap.board, Board::initial());
    }

    #[test]
    fn legal_placement_flips_and_passes_the_turn() {
        let mut session = manual_session();
        session.start();
        session.place_token(4, 2);
        let snap = session.snapshot();
        assert_eq!(snap.board.get(4, 2), Token::Black);
        assert_eq!(snap.board.get(4, 3), Token::Black);
        assert_eq!(snap.next_turn, Token::White);
    }

    #[test]
    fn illegal_placement_is_silently_ignored() {
        let mut session = manual_session();
        session.start();
        let before = session.snapshot();
        session.place_token(0, 0);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn observers_fire_on_every_entry_point() {
        let mut session = manual_session();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        session.on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session.start();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        session.place_token(0, 0); // no-op still notifies
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        session.place_token(4, 2);
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn opponent_without_moves_must_pass() {
        let mut session = manual_session();
        session.start();
        // Black can capture the white disc at (1,0) by playing (2,0),
        // but White has no black run terminated by a white disc anywhere,
        // so the turn must stay with Black.
        force_board(
            &mut session,
            &[
                "BW......",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
            ],
        );
        session.next_turn = Token::Black;
        session.advance_turn();
        let snap = session.snapshot();
        assert!(snap.running);
        assert_eq!(snap.next_turn, Token::Black, "white must pass");
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn blocked_mover_hands_the_turn_over() {
        let mut session = manual_session();
        session.start();
        // Black has no legal move anywhere, White can capture at (2,0).
        force_board(
            &mut session,
            &[
                "WB......",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
            ],
        );
        session.next_turn = Token::Black;
        session.advance_turn();
        let snap = session.snapshot();
        assert!(snap.running);
        assert_eq!(snap.next_turn, Token::White);
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn stalemate_finishes_with_the_leader_winning() {
        let mut session = manual_session();
        session.start();
        // Neither side can move; Black leads on discs.
        force_board(
            &mut session,
            &[
                "BBB.....",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                ".......W",
            ],
        );
        session.advance_turn();
        let snap = session.snapshot();
        assert!(!snap.running);
        assert_eq!(snap.winner, Some(Token::Black));
    }

    #[test]
    fn equal_scores_finish_as_a_draw() {
        let mut session = manual_session();
        session.start();
        force_board(
            &mut session,
            &[
                "B.......",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                ".......W",
            ],
        );
        session.advance_turn();
        let snap = session.snapshot();
        assert!(!snap.running);
        assert_eq!(snap.winner, None, "equal discs must leave no winner");
    }

    #[test]
    fn termination_never_strands_a_running_game() {
        // Play a full seeded AI-vs-AI game; whenever the session reports
        // running, at least one side must hold a legal move.
        let mut session = instant_session();
        session.set_seeded_strategy(Token::Black, Policy::RandomAi, 11);
        session.set_seeded_strategy(Token::White, Policy::WeightedAi, 12);
        session.start();
        let snap = session.snapshot();
        assert!(!snap.running, "cheap AI pairing plays out synchronously");
        assert!(
            !has_any_legal_move(&snap.board, Token::Black)
                && !has_any_legal_move(&snap.board, Token::White)
        );
    }

    #[test]
    fn ai_vs_ai_game_reaches_a_consistent_verdict() {
        let mut session = instant_session();
        session.set_seeded_strategy(Token::Black, Policy::WeightedAi, 3);
        session.set_seeded_strategy(Token::White, Policy::RandomAi, 4);
        session.start();
        let snap = session.snapshot();
        assert!(!snap.running);
        let black = snap.board.score_for(Token::Black);
        let white = snap.board.score_for(Token::White);
        match snap.winner {
            Some(Token::Black) => assert!(black > white),
            Some(Token::White) => assert!(white > black),
            _ => assert_eq!(black, white),
        }
    }

    #[test]
    fn deep_search_parks_the_session_until_polled() {
        let mut session = instant_session();
        session.set_strategy(Token::Black, Policy::MinMaxAi);
        session.set_strategy(Token::White, Policy::Human);
        session.start();
        assert!(session.searching(), "black's opening goes to the worker");

        // The board must not change until the result is applied.
        assert_eq!(*session.board(), Board::initial());
        session.resolve_pending();
        assert!(!session.searching());
        assert_eq!(session.board().score_for(Token::Black), 4);
        assert_eq!(session.next_turn(), Token::White);
    }

    #[test]
    fn placements_are_ignored_while_searching() {
        let mut session = GameSession::with_search_worker(SearchWorker::with_latency_floor(
            Duration::from_millis(200),
        ));
        session.set_strategy(Token::Black, Policy::MinMaxAi);
        session.set_strategy(Token::White, Policy::Human);
        session.start();
        assert!(session.searching());
        session.place_token(4, 2);
        assert_eq!(
            *session.board(),
            Board::initial(),
            "no placement may land while a search is in flight"
        );
        session.resolve_pending();
    }

    #[test]
    fn poll_reports_progress_only_when_a_result_lands() {
        let mut session = instant_session();
        session.set_strategy(Token::Black, Policy::MinMaxAi);
        session.set_strategy(Token::White, Policy::Human);
        session.start();

        let deadline = Instant::now() + Duration::from_secs(10);
        while session.searching() {
            assert!(Instant::now() < deadline, "search result never arrived");
            session.poll();
            std::thread::yield_now();
        }
        assert_eq!(session.next_turn(), Token::White);
        assert!(!session.poll(), "nothing pending, nothing to apply");
    }

    #[test]
    fn minmax_pairing_plays_a_full_game_via_polling() {
        let mut session = instant_session();
        session.set_strategy(Token::Black, Policy::MinMaxAi);
        session.set_seeded_strategy(Token::White, Policy::RandomAi, 9);
        session.start();
        while session.running() {
            session.resolve_pending();
        }
        let snap = session.snapshot();
        assert!(!snap.running);
        assert_eq!(
            snap.board.score_for(Token::Black)
                + snap.board.score_for(Token::White)
                + snap.board.count_empty(),
            64
        );
    }

    #[test]
    fn sessions_do_not_interfere() {
        let mut a = manual_session();
        let mut b = manual_session();
        a.start();
        b.start();
        a.place_token(4, 2);
        assert_eq!(*b.board(), Board::initial());
        assert_eq!(b.next_turn(), Token::Black);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut session = manual_session();
        session.start();
        let snap = session.snapshot();
        let json = serde_json::to_string(&snap).expect("snapshot serializes");
        let restored: Snapshot = serde_json::from_str(&json).expect("snapshot deserializes");
        assert_eq!(restored, snap);
    }

    #[test]
    fn restart_clears_a_finished_game() {
        let mut session = manual_session();
        session.start();
        force_board(
            &mut session,
            &[
                "B.......",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                ".......W",
            ],
        );
        session.advance_turn();
        assert!(!session.running());
        session.start();
        assert!(session.running());
        assert_eq!(session.winner(), None);
        assert_eq!(*session.board(), Board::initial());
    }
}
