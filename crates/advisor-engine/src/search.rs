//! Depth-bounded minimax search with alpha-beta pruning.
//!
//! Two mutually recursive roles alternate ply by ply: the maximizer picks
//! the highest child score and raises alpha, the minimizer picks the lowest
//! and lowers beta; either cuts off as soon as its running best crosses the
//! other bound. Scores accumulate relative to the advised side (see
//! [`Position`]), so the root is always a maximizing node no matter whose
//! turn it is.

use crate::position::{Outcome, Position};
use advisor_core::Move;

/// Outcome of one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The recommended move, or `None` when the root is already terminal.
    pub best_move: Option<Move>,
    /// Score of the chosen line, from the advised side's point of view.
    pub score: i32,
    /// Positions visited during this call.
    pub nodes: u64,
}

/// Fixed-depth alpha-beta searcher.
///
/// Carries no position state, so one searcher serves a whole game; the
/// lifetime node counter is purely diagnostic.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u32,
    nodes_total: u64,
}

impl Searcher {
    /// Default look-ahead depth in plies.
    pub const DEFAULT_DEPTH: u32 = 4;

    /// Creates a searcher that looks ahead `max_depth` plies.
    pub fn new(max_depth: u32) -> Self {
        Searcher {
            max_depth,
            nodes_total: 0,
        }
    }

    /// Returns the configured look-ahead depth.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Positions visited over the searcher's lifetime.
    pub fn nodes_total(&self) -> u64 {
        self.nodes_total
    }

    /// Picks the best move for the advised side from `root`.
    ///
    /// Ties keep the first-generated move. When the root has no legal moves
    /// the result carries no move and the root's terminal score.
    pub fn select_move(&mut self, root: &Position) -> SearchResult {
        let mut nodes = 0;
        let mut root = root.clone();
        let (score, best_move) = self.maximize(&mut root, i32::MIN, i32::MAX, 0, &mut nodes);
        self.nodes_total += nodes;
        SearchResult {
            best_move,
            score,
            nodes,
        }
    }

    fn maximize(
        &self,
        node: &mut Position,
        mut alpha: i32,
        beta: i32,
        depth: u32,
        nodes: &mut u64,
    ) -> (i32, Option<Move>) {
        // Expanding before the cutoff test also settles checkmate and draw
        // scoring on the node itself.
        let mut children = node.expand();
        if node.outcome != Outcome::Ongoing || depth == self.max_depth {
            return (node.score, None);
        }

        let mut best = i32::MIN;
        let mut best_move = None;
        for child in children.iter_mut() {
            *nodes += 1;
            let (value, _) = self.minimize(child, alpha, beta, depth + 1, nodes);
            if value > best {
                best = value;
                best_move = child.last_move;
                if best > alpha {
                    alpha = best;
                }
            }
            // The minimizer above would never allow this line.
            if best >= beta {
                return (best, best_move);
            }
        }
        (best, best_move)
    }

    fn minimize(
        &self,
        node: &mut Position,
        alpha: i32,
        mut beta: i32,
        depth: u32,
        nodes: &mut u64,
    ) -> (i32, Option<Move>) {
        let mut children = node.expand();
        if node.outcome != Outcome::Ongoing || depth == self.max_depth {
            return (node.score, None);
        }

        let mut best = i32::MAX;
        let mut best_move = None;
        for child in children.iter_mut() {
            *nodes += 1;
            let (value, _) = self.maximize(child, alpha, beta, depth + 1, nodes);
            if value < best {
                best = value;
                best_move = child.last_move;
                if best < beta {
                    beta = best;
                }
            }
            // The maximizer above would never allow this line.
            if best <= alpha {
                return (best, best_move);
            }
        }
        (best, best_move)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}
