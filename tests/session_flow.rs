//! Full session flows: playing complete games, the save-after-every-move
//! policy, and graceful fallback from unusable save files.

use reversi::{rules, persistence, Engine, GameSession, GameStatus, Player};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "parallel-reversi-flow-{}-{}.json",
        name,
        std::process::id()
    ))
}

fn engine() -> Engine {
    Engine::with_seed(2, 17)
}

#[test]
fn plays_a_complete_small_game() {
    let mut session = GameSession::new_game(engine(), None, 4, 1).unwrap();
    let mut guard = 0;
    while !session.is_game_over() {
        guard += 1;
        assert!(guard < 64, "game failed to terminate");
        if rules::can_move(session.board(), Player::Human) {
            let mv = rules::legal_moves(session.board(), Player::Human)[0];
            session.apply_human_move(mv).unwrap();
        }
        session.run_computer_round();
    }
    // Discs are never removed, so a finished 4x4 game accounts for every
    // placed disc.
    let discs = rules::disc_count(session.board(), Player::Ai)
        + rules::disc_count(session.board(), Player::Human);
    assert!(discs >= 4);
    assert!(session.status() != GameStatus::InProgress);
}

#[test]
fn every_applied_move_is_saved() {
    let path = scratch_path("saves");
    let _ = fs::remove_file(&path);

    let mut session =
        GameSession::new_game(engine(), Some(path.clone()), 8, 1).unwrap();
    let initial = persistence::load(&path).unwrap();
    assert_eq!(initial.to_move, Player::Human);

    let mv = rules::legal_moves(session.board(), Player::Human)[0];
    session.apply_human_move(mv).unwrap();
    let after_human = persistence::load(&path).unwrap();
    assert_eq!(after_human.to_move, Player::Ai);
    assert_eq!(rules::disc_count(&after_human.board, Player::Human), 4);

    session.run_computer_round();
    let after_round = persistence::load(&path).unwrap();
    assert_eq!(after_round.to_move, Player::Human);
    assert_eq!(&after_round.board, session.board());

    let _ = fs::remove_file(&path);
}

#[test]
fn resume_restores_the_saved_game() {
    let path = scratch_path("resume");
    let _ = fs::remove_file(&path);

    let mut session =
        GameSession::new_game(engine(), Some(path.clone()), 8, 2).unwrap();
    let mv = rules::legal_moves(session.board(), Player::Human)[0];
    session.apply_human_move(mv).unwrap();
    let expected = session.state().clone();
    drop(session);

    let resumed = GameSession::resume_or_new(engine(), path.clone(), 8, 2).unwrap();
    assert_eq!(resumed.state(), &expected);

    let _ = fs::remove_file(&path);
}

#[test]
fn corrupt_save_falls_back_to_a_fresh_game() {
    let path = scratch_path("corrupt");
    fs::write(&path, "{\"not\": \"a game\"}").unwrap();

    let session = GameSession::resume_or_new(engine(), path.clone(), 8, 3).unwrap();
    assert_eq!(session.to_move(), Player::Human);
    assert_eq!(session.board().size(), 8);
    assert_eq!(rules::disc_count(session.board(), Player::Human), 2);
    assert_eq!(rules::disc_count(session.board(), Player::Ai), 2);

    // The fallback game overwrote the broken file with a valid one.
    assert!(persistence::load(&path).is_ok());

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_save_starts_a_fresh_game() {
    let path = scratch_path("missing");
    let _ = fs::remove_file(&path);
    let session = GameSession::resume_or_new(engine(), path.clone(), 6, 1).unwrap();
    assert_eq!(session.board().size(), 6);
    assert!(!session.is_game_over());
    let _ = fs::remove_file(&path);
}

#[test]
fn computer_round_is_a_no_op_when_ai_is_stuck() {
    // Hand-build a state where only the human can move, then ask for a
    // computer round: nothing must change except the turn marker.
    let path = scratch_path("noop");
    let _ = fs::remove_file(&path);

    // Build the one-sided position via persistence: the human flanks an
    // AI disc, while no human run ends on an AI disc.
    let session = GameSession::new_game(engine(), None, 4, 1).unwrap();
    let mut state = session.state().clone();
    state.board = reversi::Board::empty(4);
    state.board.set(reversi::Coord::new(1, 0), reversi::Cell::Ai);
    state.board.set(reversi::Coord::new(2, 0), reversi::Cell::Human);
    state.board.set(reversi::Coord::new(3, 0), reversi::Cell::Human);
    persistence::save(&state, &path).unwrap();
    let mut session = GameSession::resume_or_new(engine(), path.clone(), 4, 1).unwrap();

    assert!(!rules::can_move(session.board(), Player::Ai));
    let report = session.run_computer_round();
    assert!(report.is_none());
    assert_eq!(session.to_move(), Player::Human);
    assert!(rules::can_move(session.board(), Player::Human));

    let _ = fs::remove_file(&path);
}
