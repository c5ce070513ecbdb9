//! # Parallel Reversi Engine
//!
//! A Reversi (Othello) engine where a human plays against a minimax AI on a
//! configurable square board. The AI runs a deadline-bounded minimax search
//! with alpha-beta pruning and evaluates every root candidate in parallel
//! on a worker pool, aggregating depth/node/prune diagnostics per round.
//!
//! ## Crate layout
//! - [`board`] — cells, sides, coordinates, and the grid itself
//! - [`rules`] — legal-move derivation, disc flipping, terminal test, scoring
//! - [`search`] — per-candidate minimax with a wall-clock deadline
//! - [`engine`] — parallel root dispatch, aggregation, round sequencing
//! - [`session`] — authoritative game state and the operations a front end
//!   drives
//! - [`worker`] — channel-based worker thread for asynchronous rounds
//! - [`persistence`] — JSON save/load with validation
//!
//! The search intentionally has no positional heuristics and no iterative
//! deepening: evaluation is the raw disc differential, and the time budget
//! is split across sibling subtrees as the recursion descends.

pub mod board;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod rules;
pub mod search;
pub mod session;
pub mod worker;

pub use board::{Board, Cell, Coord, Player};
pub use engine::{Engine, RoundReport};
pub use error::{Error, Result};
pub use search::MoveEvaluation;
pub use session::{GameSession, GameState, GameStatus};
pub use worker::{SessionEvent, SessionHandle, SessionRequest};
