//! Error types for the session and persistence layers.
//!
//! A deadline expiring inside the search is deliberately not an error: it
//! is an expected leaf condition that still yields a valid evaluation.

use crate::board::Coord;
use std::path::PathBuf;

/// Errors surfaced by the session and persistence layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A human move targeted a cell that is not a legal move. Raised before
    /// the board is touched.
    #[error("illegal move at {coord}")]
    IllegalMove { coord: Coord },

    /// Board sizes must be even and at least 4 so the four-disc opening
    /// exists.
    #[error("board size {size} is not an even number of at least 4")]
    InvalidBoardSize { size: usize },

    /// The AI needs a positive time budget to search with.
    #[error("AI time budget must be at least 1 second, got {seconds}")]
    InvalidTimeBudget { seconds: u64 },

    /// A save file deserialized but does not describe a playable game.
    #[error("saved game at {path} is corrupt: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
