//! Asynchronous search channel.
//!
//! Deep minimax is too slow to run on the thread that owns the game
//! session, so search requests are handed to a dedicated worker thread
//! and the result comes back through a ticket the caller polls or waits
//! on. Every AI decision is additionally raced against a minimum-latency
//! timer: whichever resolves later wins. The floor is a pacing device
//! for interactive use, not a correctness requirement, and is
//! configurable down to zero.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, Position, Token};
use crate::search::search;

/// Default minimum latency per decision, in milliseconds.
const DEFAULT_LATENCY_FLOOR_MS: u64 = 300;

/// A search request queued for the worker thread.
struct SearchJob {
    board: Board,
    token: Token,
    depth: u32,
    reply: Sender<Option<Position>>,
}

/// Handle to one in-flight search request.
///
/// Exactly one result arrives per submitted job; there is no
/// cancellation. Dropping the ticket simply discards the reply.
pub struct SearchTicket {
    reply: Receiver<Option<Position>>,
    ready_at: Instant,
}

impl SearchTicket {
    /// Non-blocking poll. Yields nothing until both the computation has
    /// finished and the latency floor has elapsed.
    pub fn try_take(&self) -> Option<Option<Position>> {
        if Instant::now() < self.ready_at {
            return None;
        }
        match self.reply.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            // The worker thread is gone; treat the request as answered
            // with no move rather than poisoning the session.
            Err(TryRecvError::Disconnected) => Some(None),
        }
    }

    /// Blocks until the result is available, then sleeps out whatever
    /// remains of the latency floor.
    pub fn take(self) -> Option<Position> {
        let result = self.reply.recv().unwrap_or(None);
        let now = Instant::now();
        if now < self.ready_at {
            thread::sleep(self.ready_at - now);
        }
        result
    }
}

/// Owns the worker thread that executes deep searches off the session's
/// thread. Requests are queued and answered in submission order; each
/// request/response pair is independent.
pub struct SearchWorker {
    jobs: Sender<SearchJob>,
    latency_floor: Duration,
}

impl SearchWorker {
    /// Creates a worker with the default 300 ms latency floor.
    pub fn new() -> Self {
        SearchWorker::with_latency_floor(Duration::from_millis(DEFAULT_LATENCY_FLOOR_MS))
    }

    /// Creates a worker with an explicit latency floor. Zero disables
    /// the pacing entirely.
    pub fn with_latency_floor(latency_floor: Duration) -> Self {
        let (jobs, queue) = mpsc::channel::<SearchJob>();
        thread::spawn(move || {
            while let Ok(job) = queue.recv() {
                let outcome = search(&job.board, job.token, job.depth);
                // The requester may have gone away; nobody to tell.
                let _ = job.reply.send(outcome.best_move);
            }
        });
        SearchWorker {
            jobs,
            latency_floor,
        }
    }

    /// Queues a search and returns the ticket its result arrives on.
    pub fn submit(&self, board: Board, token: Token, depth: u32) -> SearchTicket {
        let (reply, receiver) = mpsc::channel();
        let ticket = SearchTicket {
            reply: receiver,
            ready_at: Instant::now() + self.latency_floor,
        };
        let job = SearchJob {
            board,
            token,
            depth,
            reply,
        };
        if let Err(mpsc::SendError(job)) = self.jobs.send(job) {
            // Worker thread died (it never panics in normal operation);
            // fall back to answering inline so the ticket still resolves.
            let outcome = search(&job.board, job.token, job.depth);
            let _ = job.reply.send(outcome.best_move);
        }
        ticket
    }
}

impl Default for SearchWorker {
    fn default() -> Self {
        SearchWorker::new()
    }
}
