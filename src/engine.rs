//! # Search Orchestrator
//!
//! Drives one full computer round. Root candidates are shuffled (seedable,
//! so tests can pin the order), fanned out across a rayon worker pool with
//! one [`MoveEvaluation`] per candidate, joined, and aggregated into a
//! [`RoundReport`]. Because the opponent may be left without a legal move,
//! a single round can chain several computer moves; the loop keeps playing
//! until the opponent can answer or the game is over.
//!
//! The pool is cached inside the engine and rebuilt whenever a round's
//! branching factor exceeds its size, so every candidate's evaluation starts
//! immediately and no candidate burns its deadline waiting in a queue.

use crate::board::{Board, Coord, Player};
use crate::rules;
use crate::search::MoveEvaluation;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::{Duration, Instant};

/// Aggregated diagnostics for one computer round.
///
/// A round may contain several moves when the opponent is forced to pass;
/// the counters then cover every ply evaluated during the round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Moves played this round, in order.
    pub moves: Vec<Coord>,
    /// Deepest recursion level reached by any evaluation.
    pub max_depth: usize,
    /// Total nodes expanded across all evaluations.
    pub total_nodes: u64,
    /// Total alpha-beta cutoffs across all evaluations.
    pub total_pruned: u64,
    /// Wall-clock time the round took.
    pub elapsed: Duration,
}

/// The parallel root-move evaluator.
pub struct Engine {
    pool: ThreadPool,
    rng: Xoshiro256PlusPlus,
    min_threads: usize,
}

impl Engine {
    /// Creates an engine. `num_threads` is the minimum pool size; 0 means
    /// one thread per logical CPU. The pool grows on demand when a round
    /// has more candidates than threads.
    pub fn new(num_threads: usize) -> Self {
        Self::build(num_threads, Xoshiro256PlusPlus::from_entropy())
    }

    /// Creates an engine whose candidate shuffle is reproducible.
    pub fn with_seed(num_threads: usize, seed: u64) -> Self {
        Self::build(num_threads, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn build(num_threads: usize, rng: Xoshiro256PlusPlus) -> Self {
        let min_threads = if num_threads > 0 {
            num_threads
        } else {
            num_cpus::get()
        };
        Engine {
            pool: build_pool(min_threads),
            rng,
            min_threads,
        }
    }

    /// Plays one computer round against `board`.
    ///
    /// Returns `None` when the AI has no legal move (control goes straight
    /// back to the opponent). Otherwise returns the board after every move
    /// of the round plus the aggregated diagnostics. Each ply gets a fresh
    /// deadline of `budget` from the moment its dispatch starts.
    pub fn run_round(&mut self, board: &Board, budget: Duration) -> Option<(Board, RoundReport)> {
        if !rules::can_move(board, Player::Ai) {
            return None;
        }
        let started = Instant::now();
        let mut current = board.clone();
        let mut report = RoundReport::default();
        loop {
            let best = self.evaluate_ply(&current, budget, &mut report);
            current = rules::apply_move(&current, best, Player::Ai);
            report.moves.push(best);
            // The AI keeps playing while the human is stuck and it is not.
            if rules::can_move(&current, Player::Human) || !rules::can_move(&current, Player::Ai) {
                break;
            }
        }
        report.elapsed = started.elapsed();
        Some((current, report))
    }

    /// Evaluates every root candidate of one ply in parallel and returns
    /// the best move. Ties on the evaluation break to the lowest coordinate
    /// (`x` first, then `y`).
    fn evaluate_ply(&mut self, board: &Board, budget: Duration, report: &mut RoundReport) -> Coord {
        let mut candidates = rules::legal_moves(board, Player::Ai);
        candidates.shuffle(&mut self.rng);
        self.ensure_pool(candidates.len());

        let deadline = Instant::now() + budget;
        let evaluations: Vec<MoveEvaluation> = self.pool.install(|| {
            candidates
                .par_iter()
                .map(|&coord| MoveEvaluation::evaluate(board, coord, Player::Ai, deadline))
                .collect()
        });

        for eval in &evaluations {
            log::debug!(
                "candidate {} eval:{} depth:{} nodes:{} pruned:{}",
                eval.coord,
                eval.evaluation,
                eval.depth,
                eval.nodes,
                eval.pruned
            );
            report.max_depth = report.max_depth.max(eval.depth);
            report.total_nodes += eval.nodes;
            report.total_pruned += eval.pruned;
        }

        evaluations
            .iter()
            .max_by(|a, b| {
                a.evaluation
                    .cmp(&b.evaluation)
                    .then_with(|| b.coord.cmp(&a.coord))
            })
            .map(|eval| eval.coord)
            .expect("a side with a legal move produced no candidates")
    }

    fn ensure_pool(&mut self, candidates: usize) {
        let wanted = candidates.max(self.min_threads);
        if self.pool.current_num_threads() < wanted {
            self.pool = build_pool(wanted);
        }
    }
}

fn build_pool(num_threads: usize) -> ThreadPool {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .expect("failed to build search thread pool")
}
