//! Saving and loading the whole game state as JSON.
//!
//! Loading is defensive: a save produced by anything other than this engine
//! (or damaged on disk) must never put an invalid board into play, so every
//! loaded state is structurally validated and rejected as
//! [`Error::CorruptState`] when it fails. Callers treat any load failure as
//! "no saved game".

use crate::board::Cell;
use crate::error::{Error, Result};
use crate::session::GameState;
use std::fs;
use std::path::Path;

/// Writes `state` to `path`, replacing any previous save.
pub fn save(state: &GameState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads and validates a game state from `path`.
pub fn load(path: &Path) -> Result<GameState> {
    let content = fs::read_to_string(path)?;
    let state: GameState = serde_json::from_str(&content)?;
    validate(&state, path)?;
    Ok(state)
}

fn validate(state: &GameState, path: &Path) -> Result<()> {
    let corrupt = |reason: &str| Error::CorruptState {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    if !state.board.is_well_formed() {
        return Err(corrupt("board is not a square grid of even size >= 4"));
    }
    if state.board.coords().any(|c| state.board.get(c) == Cell::Pending) {
        return Err(corrupt("board contains transient pending cells"));
    }
    if state.ai_seconds == 0 {
        return Err(corrupt("AI time budget is zero"));
    }
    Ok(())
}
