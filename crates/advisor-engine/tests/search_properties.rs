//! Search behavior checked against an exhaustive reference: pruning must
//! never change the chosen move or its score, and the depth limit bounds
//! how far ahead the searcher can see.

use advisor_core::{Color, Move};
use advisor_engine::{Outcome, Position, Searcher};

/// Plain minimax without pruning, using the same generation order and the
/// same strict-improvement tie-break as the real searcher.
fn exhaustive(node: &mut Position, depth: u32, max_depth: u32, maximizing: bool) -> (i32, Option<Move>) {
    let mut children = node.expand();
    if node.outcome != Outcome::Ongoing || depth == max_depth {
        return (node.score, None);
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;
    for child in children.iter_mut() {
        let (value, _) = exhaustive(child, depth + 1, max_depth, !maximizing);
        let better = if maximizing { value > best } else { value < best };
        if better {
            best = value;
            best_move = child.last_move;
        }
    }
    (best, best_move)
}

fn compare_on(fen: &str, player: Color, depth: u32) {
    let position = Position::from_fen(fen, player).unwrap();
    let mut searcher = Searcher::new(depth);
    let pruned = searcher.select_move(&position);
    let (score, best_move) = exhaustive(&mut position.clone(), 0, depth, true);
    assert_eq!(pruned.best_move, best_move, "move differs on {fen}");
    assert_eq!(pruned.score, score, "score differs on {fen}");
}

#[test]
fn pruning_never_changes_the_result_from_the_start() {
    let position = Position::startpos(Color::White);
    let mut searcher = Searcher::new(2);
    let pruned = searcher.select_move(&position);
    let (score, best_move) = exhaustive(&mut position.clone(), 0, 2, true);
    assert_eq!(pruned.best_move, best_move);
    assert_eq!(pruned.score, score);
}

#[test]
fn pruning_never_changes_the_result_on_fixed_positions() {
    compare_on("3q3k/8/8/3R4/8/8/8/K7 w - - 0 1", Color::White, 3);
    compare_on("k7/8/8/8/8/8/8/2R1K2R w K - 0 1", Color::White, 3);
    compare_on("7k/5Q2/8/6K1/8/8/8/8 w - - 0 1", Color::White, 2);
    compare_on("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::White, 2);
    // The advised side need not be the side to move.
    compare_on("3q3k/8/8/3R4/8/8/8/K7 w - - 0 1", Color::Black, 3);
}

#[test]
fn pruning_explores_no_more_than_the_exhaustive_tree() {
    let position = Position::startpos(Color::White);

    let mut pruned = Searcher::new(3);
    let with_pruning = pruned.select_move(&position);

    // Exhaustive node count: every child of every non-terminal node above
    // the depth limit.
    fn count(node: &mut Position, depth: u32, max_depth: u32) -> u64 {
        let mut children = node.expand();
        if node.outcome != Outcome::Ongoing || depth == max_depth {
            return 0;
        }
        children
            .iter_mut()
            .map(|c| 1 + count(c, depth + 1, max_depth))
            .sum()
    }
    let full = count(&mut position.clone(), 0, 3);

    assert!(with_pruning.nodes < full, "alpha-beta should cut something");
}

#[test]
fn deeper_search_sees_the_forced_mate() {
    // Two rooks ladder: 1.Rg7 Kb8 (forced) 2.Rh8 mate. Three plies deep.
    let fen = "k7/8/8/8/5K2/8/6RR/8 w - - 0 1";

    let shallow = Searcher::new(1).select_move(&Position::from_fen(fen, Color::White).unwrap());
    assert!(shallow.score < 100, "one ply cannot see the mate");

    let deep = Searcher::new(3).select_move(&Position::from_fen(fen, Color::White).unwrap());
    assert!(deep.score >= 100, "three plies reach the mate");
}

#[test]
fn recommendations_stay_inside_the_legal_move_set() {
    let mut position = Position::startpos(Color::White);
    let legal: Vec<Option<Move>> = position.expand().iter().map(|c| c.last_move).collect();
    let result = Searcher::new(2).select_move(&position);
    assert!(legal.contains(&result.best_move));
}
