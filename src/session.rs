//! # Game Session - Central Game State Management
//!
//! The [`GameSession`] owns the authoritative game state. It is the only
//! place the real board is mutated: human moves are validated against the
//! rules before they are applied, computer rounds go through the
//! [`Engine`], and every successfully applied move is persisted. Search
//! workers and presentation layers only ever see clones.

use crate::board::{Board, Coord, Player};
use crate::engine::{Engine, RoundReport};
use crate::error::{Error, Result};
use crate::persistence;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Everything that defines a game in progress. Persisted wholesale by the
/// save layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub to_move: Player,
    /// Time budget per computer round, in seconds.
    pub ai_seconds: u64,
}

/// Current game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress.
    InProgress,
    /// Game ended with a winner.
    Win(Player),
    /// Game ended with an even disc count.
    Draw,
}

impl GameStatus {
    /// Reads the status off a board: in progress until neither side can
    /// move, then decided by the sign of the score.
    pub fn of(board: &Board) -> GameStatus {
        if !rules::is_terminal(board) {
            return GameStatus::InProgress;
        }
        match rules::score(board) {
            n if n > 0 => GameStatus::Win(Player::Ai),
            n if n < 0 => GameStatus::Win(Player::Human),
            _ => GameStatus::Draw,
        }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// The single source of truth for one game.
pub struct GameSession {
    state: GameState,
    engine: Engine,
    save_path: Option<PathBuf>,
}

impl GameSession {
    /// Starts a fresh game on a seeded board with the human to move.
    ///
    /// `size` must be even and at least [`Board::MIN_SIZE`]; `ai_seconds`
    /// must be positive. The initial state is saved immediately.
    pub fn new_game(
        engine: Engine,
        save_path: Option<PathBuf>,
        size: usize,
        ai_seconds: u64,
    ) -> Result<Self> {
        if size < Board::MIN_SIZE || size % 2 != 0 {
            return Err(Error::InvalidBoardSize { size });
        }
        if ai_seconds == 0 {
            return Err(Error::InvalidTimeBudget { seconds: ai_seconds });
        }
        let mut session = GameSession {
            state: GameState {
                board: Board::seeded(size),
                to_move: Player::Human,
                ai_seconds,
            },
            engine,
            save_path,
        };
        session.save();
        Ok(session)
    }

    /// Resumes the game found at `save_path`, or starts a fresh one when
    /// there is no usable save. A missing or corrupt save file is normal
    /// operation, not an error.
    pub fn resume_or_new(
        engine: Engine,
        save_path: PathBuf,
        size: usize,
        ai_seconds: u64,
    ) -> Result<Self> {
        match persistence::load(&save_path) {
            Ok(state) => Ok(GameSession {
                state,
                engine,
                save_path: Some(save_path),
            }),
            Err(err) => {
                log::warn!("no saved game restored ({}), starting fresh", err);
                Self::new_game(engine, Some(save_path), size, ai_seconds)
            }
        }
    }

    /// Applies a human move after checking it against the rules. The board
    /// is untouched unless the move is legal; on success the computer is
    /// next to move and the state is saved.
    pub fn apply_human_move(&mut self, coord: Coord) -> Result<&GameState> {
        if !rules::is_legal(&self.state.board, coord, Player::Human) {
            return Err(Error::IllegalMove { coord });
        }
        self.state.board = rules::apply_move(&self.state.board, coord, Player::Human);
        self.state.to_move = Player::Ai;
        self.save();
        Ok(&self.state)
    }

    /// Runs one computer round (possibly several chained moves when the
    /// human is stuck). Returns `None` when the computer itself has no
    /// move. Either way the human is to move afterwards.
    pub fn run_computer_round(&mut self) -> Option<RoundReport> {
        let budget = Duration::from_secs(self.state.ai_seconds);
        let outcome = self.engine.run_round(&self.state.board, budget);
        let report = match outcome {
            Some((board, report)) => {
                self.state.board = board;
                Some(report)
            }
            None => None,
        };
        self.state.to_move = Player::Human;
        self.save();
        report
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn to_move(&self) -> Player {
        self.state.to_move
    }

    pub fn is_game_over(&self) -> bool {
        rules::is_terminal(&self.state.board)
    }

    /// Game status by the sign of the score: positive means the AI holds
    /// more discs, negative the human, zero is a draw.
    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.state.board)
    }

    /// Saves the current state. Failures are reported and swallowed: a
    /// broken save file must never interrupt play.
    fn save(&self) {
        if let Some(path) = &self.save_path {
            if let Err(err) = persistence::save(&self.state, path) {
                log::warn!("failed to save game to {}: {}", path.display(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn test_engine() -> Engine {
        Engine::with_seed(2, 99)
    }

    #[test]
    fn test_new_game_rejects_bad_sizes() {
        for size in [0, 2, 3, 7] {
            let result = GameSession::new_game(test_engine(), None, size, 1);
            assert!(matches!(result, Err(Error::InvalidBoardSize { .. })), "size {}", size);
        }
    }

    #[test]
    fn test_new_game_rejects_zero_budget() {
        let result = GameSession::new_game(test_engine(), None, 8, 0);
        assert!(matches!(result, Err(Error::InvalidTimeBudget { .. })));
    }

    #[test]
    fn test_illegal_human_move_leaves_board_untouched() {
        let mut session = GameSession::new_game(test_engine(), None, 8, 1).unwrap();
        let occupied = Coord::new(3, 3);
        let nowhere_near = Coord::new(0, 0);
        for coord in [occupied, nowhere_near] {
            match session.apply_human_move(coord) {
                Err(Error::IllegalMove { coord: c }) => assert_eq!(c, coord),
                other => panic!("expected IllegalMove, got {:?}", other.map(|_| ())),
            }
        }
        assert_eq!(session.board(), &Board::seeded(8));
        assert_eq!(session.to_move(), Player::Human);
    }

    #[test]
    fn test_legal_human_move_flips_turn() {
        let mut session = GameSession::new_game(test_engine(), None, 8, 1).unwrap();
        let mv = rules::legal_moves(session.board(), Player::Human)[0];
        session.apply_human_move(mv).unwrap();
        assert_eq!(session.to_move(), Player::Ai);
        assert_eq!(rules::disc_count(session.board(), Player::Human), 4);
    }

    #[test]
    fn test_computer_round_hands_turn_back() {
        let mut session = GameSession::new_game(test_engine(), None, 4, 1).unwrap();
        let mv = rules::legal_moves(session.board(), Player::Human)[0];
        session.apply_human_move(mv).unwrap();
        let report = session.run_computer_round().expect("AI has replies early on");
        assert!(!report.moves.is_empty());
        assert_eq!(session.to_move(), Player::Human);
    }

    #[test]
    fn test_status_follows_score_sign() {
        let mut session = GameSession::new_game(test_engine(), None, 4, 1).unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(!session.is_game_over());

        // Force a finished board: a lone AI disc is terminal.
        session.state.board = Board::empty(4);
        session.state.board.set(Coord::new(0, 0), Cell::Ai);
        assert_eq!(session.status(), GameStatus::Win(Player::Ai));

        session.state.board.set(Coord::new(0, 0), Cell::Human);
        assert_eq!(session.status(), GameStatus::Win(Player::Human));

        session.state.board.set(Coord::new(0, 0), Cell::Empty);
        assert_eq!(session.status(), GameStatus::Draw);
    }
}
