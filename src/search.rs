//! # Search Engine
//!
//! Deadline-bounded minimax with alpha-beta pruning. One [`MoveEvaluation`]
//! evaluates exactly one root candidate move: the candidate is applied to
//! the starting position, then the tree below the resulting position is
//! searched until either the game ends or the wall clock passes the
//! deadline. There is no fixed depth limit — time is the only cap.
//!
//! Instead of iterative deepening, the remaining time at each node is split
//! evenly across that node's children, so every sibling subtree gets a
//! shrinking slice of the budget. The deadline check is cooperative and
//! happens only at the top of each recursive call, so a search can overrun
//! its deadline by at most the cost of one node expansion.

use crate::board::{Board, Coord, Player};
use crate::rules;
use std::time::Instant;

/// The outcome of evaluating a single root candidate, together with the
/// diagnostics counters accumulated during its search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvaluation {
    /// The candidate move this evaluation belongs to.
    pub coord: Coord,
    /// Minimax value of the position after playing the candidate.
    pub evaluation: i32,
    /// Deepest recursion level reached.
    pub depth: usize,
    /// Interior nodes expanded.
    pub nodes: u64,
    /// Sibling groups abandoned to an alpha-beta cutoff.
    pub pruned: u64,
}

impl MoveEvaluation {
    /// Applies `coord` for `player` on `board` and searches the resulting
    /// position with the opponent to move, using the full time until
    /// `deadline` as the budget.
    pub fn evaluate(board: &Board, coord: Coord, player: Player, deadline: Instant) -> Self {
        let next = rules::apply_move(board, coord, player);
        let mut result = MoveEvaluation {
            coord,
            evaluation: 0,
            depth: 0,
            nodes: 0,
            pruned: 0,
        };
        result.evaluation =
            result.minimax(&next, 0, i32::MIN, i32::MAX, player.opponent(), deadline);
        result
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        mut player: Player,
        deadline: Instant,
    ) -> i32 {
        self.depth = self.depth.max(depth);
        if Instant::now() > deadline || rules::is_terminal(board) {
            return rules::score(board);
        }
        // Forced pass: the position is not terminal, so if this side is
        // stuck the other side must have a move.
        if !rules::can_move(board, player) {
            player = player.opponent();
        }
        self.nodes += 1;
        let moves = rules::legal_moves(board, player);
        let siblings = moves.len() as u32;
        if player == Player::Ai {
            let mut max_eval = i32::MIN;
            for mv in moves {
                let child_deadline = subdivide(deadline, siblings);
                let child = rules::apply_move(board, mv, player);
                let eval =
                    self.minimax(&child, depth + 1, alpha, beta, player.opponent(), child_deadline);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.pruned += 1;
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                let child_deadline = subdivide(deadline, siblings);
                let child = rules::apply_move(board, mv, player);
                let eval =
                    self.minimax(&child, depth + 1, alpha, beta, player.opponent(), child_deadline);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.pruned += 1;
                    break;
                }
            }
            min_eval
        }
    }
}

/// A child's deadline: the time still left is divided evenly across the
/// sibling count and subtracted from the parent deadline. Recomputed per
/// sibling, so later siblings inherit whatever their elders left unused.
fn subdivide(deadline: Instant, siblings: u32) -> Instant {
    let remaining = deadline.saturating_duration_since(Instant::now());
    deadline - remaining / siblings
}
