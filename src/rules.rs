//! Move legality, move application, terminal detection, and scoring.
//!
//! Kept as free functions over a borrowed [`Board`] so the search can call
//! them against any position without going through a session. A cell is a
//! legal move for a side when, in at least one of the eight compass
//! directions, it flanks a contiguous run of opposing discs that ends on one
//! of the side's own discs.

use crate::board::{Board, Cell, Coord, Player};

/// Coordinate offsets for all neighbouring cells.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// The run of opposing discs captured by playing `from` in one direction.
///
/// Scans outward collecting contiguous opponent discs. The run counts only
/// if the scan then lands on one of `player`'s own discs; terminating on a
/// vacant cell or the board edge discards it. Shared by the legality test
/// and by [`apply_move`] so the two can never disagree.
fn captured_run(board: &Board, from: Coord, delta: (i32, i32), player: Player) -> Vec<Coord> {
    let opponent = player.opponent().cell();
    let own = player.cell();
    let mut run = Vec::new();
    let (mut x, mut y) = (from.x as i32 + delta.0, from.y as i32 + delta.1);
    while board.in_bounds(x, y) {
        let coord = Coord::new(x as usize, y as usize);
        let cell = board.get(coord);
        if cell == opponent {
            run.push(coord);
        } else if cell == own {
            return run;
        } else {
            break;
        }
        x += delta.0;
        y += delta.1;
    }
    Vec::new()
}

/// Whether `coord` is a legal move for `player`.
pub fn is_legal(board: &Board, coord: Coord, player: Player) -> bool {
    board.get(coord).is_vacant()
        && DIRECTIONS
            .iter()
            .any(|&delta| !captured_run(board, coord, delta, player).is_empty())
}

/// Every legal move for `player`, in row-major board order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Coord> {
    board
        .coords()
        .filter(|&coord| is_legal(board, coord, player))
        .collect()
}

/// Whether `player` has any legal move.
pub fn can_move(board: &Board, player: Player) -> bool {
    board.coords().any(|coord| is_legal(board, coord, player))
}

/// Returns a new board with `player`'s disc placed at `coord` and every
/// flanked opponent run flipped. The input board is never mutated.
///
/// A legal move is guaranteed to flip at least one disc; applying an illegal
/// coordinate only places the disc (every directional run is discarded).
pub fn apply_move(board: &Board, coord: Coord, player: Player) -> Board {
    let mut next = board.clone();
    next.set(coord, player.cell());
    for delta in DIRECTIONS {
        for captured in captured_run(&next, coord, delta, player) {
            next.set(captured, player.cell());
        }
    }
    next
}

/// The game is over only when neither side has a legal move. A single
/// stuck side is a forced pass, not game over.
pub fn is_terminal(board: &Board) -> bool {
    !can_move(board, Player::Ai) && !can_move(board, Player::Human)
}

/// Signed disc differential: the sum of every cell's sign. Positive favors
/// the AI, negative the human, zero is balance. This is the only evaluation
/// heuristic in the engine.
pub fn score(board: &Board) -> i32 {
    board.coords().map(|coord| board.get(coord).sign()).sum()
}

/// Number of discs held by `player`.
pub fn disc_count(board: &Board, player: Player) -> usize {
    board
        .coords()
        .filter(|&coord| board.get(coord) == player.cell())
        .count()
}
