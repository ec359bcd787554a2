//! Self-play CLI for the kuroshiro engine.
//!
//! Plays one or more games between two computer opponents and prints
//! the final board and verdict of each.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --black POLICY  Black's policy: random|weighted|shallow|minmax (default: weighted)
//!   --white POLICY  White's policy (default: minmax)
//!   --games N       Number of games to play (default: 1)
//!   --seed N        Random seed for the random policy, 0 for entropy (default: 0)
//!   --floor-ms MS   Minimum latency per AI decision in ms (default: 0)

use std::env;
use std::process;
use std::time::{Duration, Instant};

use kuroshiro::board::Token;
use kuroshiro::search::SearchWorker;
use kuroshiro::session::GameSession;
use kuroshiro::strategy::Policy;

fn parse_policy(name: &str) -> Option<Policy> {
    match name {
        "random" => Some(Policy::RandomAi),
        "weighted" => Some(Policy::WeightedAi),
        "shallow" => Some(Policy::ShallowLookaheadAi),
        "minmax" => Some(Policy::MinMaxAi),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut black = Policy::WeightedAi;
    let mut white = Policy::MinMaxAi;
    let mut games: u32 = 1;
    let mut seed: u64 = 0;
    let mut floor_ms: u64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--black" => {
                i += 1;
                black = parse_policy(&args[i]).unwrap_or_else(|| {
                    eprintln!("invalid --black policy: {}", args[i]);
                    process::exit(1);
                });
            }
            "--white" => {
                i += 1;
                white = parse_policy(&args[i]).unwrap_or_else(|| {
                    eprintln!("invalid --white policy: {}", args[i]);
                    process::exit(1);
                });
            }
            "--games" => {
                i += 1;
                games = args[i].parse().expect("invalid --games value");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("invalid --seed value");
            }
            "--floor-ms" => {
                i += 1;
                floor_ms = args[i].parse().expect("invalid --floor-ms value");
            }
            other => {
                eprintln!("unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut black_wins = 0u32;
    let mut white_wins = 0u32;
    let mut draws = 0u32;

    for game in 0..games {
        let worker = SearchWorker::with_latency_floor(Duration::from_millis(floor_ms));
        let mut session = GameSession::with_search_worker(worker);
        if seed == 0 {
            session.set_strategy(Token::Black, black);
            session.set_strategy(Token::White, white);
        } else {
            session.set_seeded_strategy(Token::Black, black, seed.wrapping_add(game as u64 * 2));
            session.set_seeded_strategy(Token::White, white, seed.wrapping_add(game as u64 * 2 + 1));
        }

        let started = Instant::now();
        session.start();
        while session.running() {
            session.resolve_pending();
        }

        let snap = session.snapshot();
        let black_score = snap.board.score_for(Token::Black);
        let white_score = snap.board.score_for(Token::White);
        match snap.winner {
            Some(Token::Black) => black_wins += 1,
            Some(Token::White) => white_wins += 1,
            _ => draws += 1,
        }

        println!("game {} ({:.1?})", game + 1, started.elapsed());
        print!("{}", snap.board);
        match snap.winner {
            Some(t) => println!("winner: {:?} ({} - {})", t, black_score, white_score),
            None => println!("draw ({} - {})", black_score, white_score),
        }
        println!();
    }

    if games > 1 {
        println!(
            "totals: black {} / white {} / draws {}",
            black_wins, white_wins, draws
        );
    }
}
