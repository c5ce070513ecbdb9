//! # Parallel Reversi
//!
//! Terminal front end for the engine: renders the board, reads human moves
//! as `x,y`, and drives the session worker while the AI searches. The real
//! game logic lives in the library; this binary is only the presentation
//! and input loop.
//!
//! ## Usage
//! Run with `cargo run --release` for best AI performance. An interrupted
//! game is picked up from the save file on the next start; pass
//! `--fresh` to discard it.

use clap::Parser;
use colored::Colorize;
use reversi::{
    rules, Board, Cell, Coord, Engine, GameSession, GameStatus, Player, RoundReport, SessionEvent,
    SessionHandle,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, default_value_t = 8)]
    board_size: usize,

    #[clap(short, long, default_value_t = 3)]
    ai_seconds: u64,

    #[clap(short, long, default_value_t = 0)]
    num_threads: usize,

    /// Seed for the candidate shuffle; omit for a different game each run.
    #[clap(long)]
    seed: Option<u64>,

    #[clap(long, default_value = "reversi.save")]
    save_path: PathBuf,

    /// Ignore any saved game and start over.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    fresh: bool,
}

fn main() -> reversi::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = match args.seed {
        Some(seed) => Engine::with_seed(args.num_threads, seed),
        None => Engine::new(args.num_threads),
    };
    let session = if args.fresh {
        GameSession::new_game(engine, Some(args.save_path), args.board_size, args.ai_seconds)?
    } else {
        GameSession::resume_or_new(engine, args.save_path, args.board_size, args.ai_seconds)?
    };

    let mut state = session.state().clone();
    let handle = reversi::worker::spawn(session);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(&state.board);
        if rules::is_terminal(&state.board) {
            announce_result(&state.board);
            break;
        }

        if state.to_move == Player::Human {
            if rules::can_move(&state.board, Player::Human) {
                match read_human_move(&mut lines, &state.board) {
                    Some(coord) => {
                        handle.submit_move(coord);
                        match wait_for_move(&handle) {
                            Some(new_state) => state = new_state,
                            None => continue,
                        }
                    }
                    None => break,
                }
            } else {
                println!("{}", "You have no legal move - the AI plays on.".yellow());
            }
        }

        handle.request_round();
        if let Some(new_state) = wait_for_round(&handle) {
            state = new_state;
        } else {
            break;
        }
    }

    handle.shutdown();
    Ok(())
}

/// Prints the board with AI discs in blue, human discs in red, and legal
/// human moves marked.
fn render(board: &Board) {
    let legal = rules::legal_moves(board, Player::Human);
    print!("   ");
    for x in 0..board.size() {
        print!("{:>2} ", x);
    }
    println!();
    for y in 0..board.size() {
        print!("{:>2} ", y);
        for x in 0..board.size() {
            let coord = Coord::new(x, y);
            let glyph = match board.get(coord) {
                Cell::Ai => " ●".blue(),
                Cell::Human => " ●".red(),
                Cell::Empty | Cell::Pending => {
                    if legal.contains(&coord) {
                        " +".green()
                    } else {
                        " ·".dimmed()
                    }
                }
            };
            print!("{} ", glyph);
        }
        println!();
    }
    println!(
        "   {}: {}  {}: {}",
        "AI".blue(),
        rules::disc_count(board, Player::Ai),
        "You".red(),
        rules::disc_count(board, Player::Human)
    );
}

fn read_human_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    board: &Board,
) -> Option<Coord> {
    loop {
        print!("your move (x,y, or q to quit): ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return None,
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return None;
        }
        match trimmed.parse::<Coord>() {
            Ok(coord) if coord.x < board.size() && coord.y < board.size() => return Some(coord),
            Ok(_) => println!("{}", "that cell is off the board".red()),
            Err(err) => println!("{}", err.red()),
        }
    }
}

/// Waits for the applied/rejected answer to a submitted human move.
fn wait_for_move(handle: &SessionHandle) -> Option<reversi::GameState> {
    loop {
        match handle.events.recv().ok()? {
            SessionEvent::MoveApplied { state } => return Some(state),
            SessionEvent::MoveRejected { reason, .. } => {
                println!("{}", reason.red());
                return None;
            }
            _ => {}
        }
    }
}

/// Waits for a computer round to finish, showing progress ticks inline.
fn wait_for_round(handle: &SessionHandle) -> Option<reversi::GameState> {
    loop {
        match handle.events.recv().ok()? {
            SessionEvent::RoundStarted { .. } => {
                print!("{}", "AI is thinking".cyan());
                let _ = io::stdout().flush();
            }
            SessionEvent::Progress { elapsed } => {
                print!("\r{} {:>5.1}s", "AI is thinking".cyan(), elapsed.as_secs_f64());
                let _ = io::stdout().flush();
            }
            SessionEvent::RoundCompleted { state, report } => {
                println!();
                match report {
                    Some(report) => print_report(&report),
                    None => println!("{}", "AI has no legal move - back to you.".yellow()),
                }
                return Some(state);
            }
            _ => {}
        }
    }
}

fn print_report(report: &RoundReport) {
    let moves: Vec<String> = report.moves.iter().map(|m| m.to_string()).collect();
    println!(
        "AI played {} in {:.1}s  {}",
        moves.join(", ").bold(),
        report.elapsed.as_secs_f64(),
        format!(
            "(depth {}, {} nodes, {} pruned)",
            report.max_depth, report.total_nodes, report.total_pruned
        )
        .dimmed()
    );
}

fn announce_result(board: &Board) {
    match GameStatus::of(board) {
        GameStatus::Win(Player::Ai) => println!("{}", "The AI wins.".blue().bold()),
        GameStatus::Win(Player::Human) => println!("{}", "You win!".green().bold()),
        _ => println!("{}", "It's a draw.".bold()),
    }
}
