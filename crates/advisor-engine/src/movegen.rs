//! Legal successor generation.
//!
//! Candidates are generated piece by piece in roster order; each one is
//! applied and the resulting position kept only if it does not leave the
//! mover's own king attacked. That application-then-filter step is the
//! single source of legality — there is no separate per-move validator.

use crate::attacks::{DIAGONAL_DIRS, KING_STEPS, KNIGHT_JUMPS, STRAIGHT_DIRS};
use crate::board::PieceId;
use crate::position::Position;
use advisor_core::{Move, Piece, Square};

/// Generates every legal successor of `position`.
pub(crate) fn successors(position: &Position) -> Vec<Position> {
    let mut children = Vec::new();
    for id in PieceId::all() {
        let Some(from) = position.mine.roster[id.index()] else {
            continue;
        };
        let occ = position
            .board
            .get(from)
            .expect("roster squares are occupied");
        match occ.piece {
            Piece::Rook => slide(position, from, &STRAIGHT_DIRS, &mut children),
            Piece::Bishop => slide(position, from, &DIAGONAL_DIRS, &mut children),
            Piece::Queen => {
                slide(position, from, &STRAIGHT_DIRS, &mut children);
                slide(position, from, &DIAGONAL_DIRS, &mut children);
            }
            Piece::Knight => steps(position, from, &KNIGHT_JUMPS, &mut children),
            Piece::King => {
                steps(position, from, &KING_STEPS, &mut children);
                castles(position, from, &mut children);
            }
            Piece::Pawn => pawn_moves(position, from, &mut children),
        }
    }
    children
}

/// Applies the candidate and keeps the child unless it exposes the mover's
/// own king.
fn try_move(position: &Position, mv: Move, children: &mut Vec<Position>) {
    let child = position.apply(mv);
    if !child.mover_king_attacked() {
        children.push(child);
    }
}

/// A destination square may be taken if it holds an enemy piece other than
/// the king; the king is never capturable.
fn capturable(position: &Position, sq: Square) -> bool {
    match position.board.get(sq) {
        Some(occ) => occ.color != position.side_to_move && occ.piece != Piece::King,
        None => false,
    }
}

fn slide(position: &Position, from: Square, dirs: &[(i8, i8)], children: &mut Vec<Position>) {
    for &(dr, df) in dirs {
        let mut sq = from;
        while let Some(to) = sq.offset(dr, df) {
            if position.board.is_empty(to) {
                try_move(position, Move::new(from, to), children);
                sq = to;
            } else {
                if capturable(position, to) {
                    try_move(position, Move::new(from, to), children);
                }
                break;
            }
        }
    }
}

fn steps(position: &Position, from: Square, offsets: &[(i8, i8)], children: &mut Vec<Position>) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if position.board.is_empty(to) || capturable(position, to) {
                try_move(position, Move::new(from, to), children);
            }
        }
    }
}

fn pawn_moves(position: &Position, from: Square, children: &mut Vec<Position>) {
    let me = position.side_to_move;
    let up = me.pawn_direction();
    let last_rank = me.opposite().back_rank();

    if let Some(one) = from.offset(up, 0) {
        if position.board.is_empty(one) {
            let push = Move::new(from, one);
            if one.rank_index() == last_rank {
                promote(position, push, children);
            } else {
                try_move(position, push, children);
            }
            // The double step also needs the single-step square free.
            if from.rank_index() == me.pawn_rank() {
                if let Some(two) = from.offset(2 * up, 0) {
                    if position.board.is_empty(two) {
                        try_move(position, Move::new(from, two), children);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(up, df) else {
            continue;
        };
        if capturable(position, to) {
            let mv = Move::new(from, to);
            if to.rank_index() == last_rank {
                promote(position, mv, children);
            } else {
                try_move(position, mv, children);
            }
        } else if position.en_passant == Some(to) {
            try_move(position, Move::new(from, to), children);
        }
    }
}

fn promote(position: &Position, mv: Move, children: &mut Vec<Position>) {
    for child in position.apply_promotions(mv) {
        if !child.mover_king_attacked() {
            children.push(child);
        }
    }
}

fn castles(position: &Position, from: Square, children: &mut Vec<Position>) {
    let king = position
        .board
        .get(from)
        .expect("the king stands on its roster square");
    if position.mine.moved[king.id.index()] || position.in_check() {
        return;
    }
    let rank = from.rank_index();

    for (corner_file, king_file) in [(0u8, 2u8), (7u8, 6u8)] {
        if !rook_ready(position, rank, corner_file) {
            continue;
        }

        // Every square the king crosses or lands on must be empty and safe.
        let path = if corner_file == 0 {
            [2u8, 3u8]
        } else {
            [5u8, 6u8]
        };
        let path_clear = path.iter().all(|&file| {
            let sq = Square::from_coords(rank, file).expect("castling path is on the board");
            position.board.is_empty(sq) && !position.theirs.attacks.is_attacked(sq)
        });

        // The square next to the queenside rook is merely crossed by the
        // rook: it has to be empty, but may be attacked.
        let knight_square_clear = corner_file != 0
            || position
                .board
                .is_empty(Square::from_coords(rank, 1).expect("castling path is on the board"));

        if path_clear && knight_square_clear {
            let to = Square::from_coords(rank, king_file).expect("castling path is on the board");
            try_move(position, Move::new(from, to), children);
        }
    }
}

fn rook_ready(position: &Position, rank: u8, file: u8) -> bool {
    let corner = Square::from_coords(rank, file).expect("corner square is on the board");
    match position.board.get(corner) {
        Some(occ) => {
            occ.color == position.side_to_move
                && occ.piece == Piece::Rook
                && !position.mine.moved[occ.id.index()]
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Outcome;
    use advisor_core::Color;

    fn moves_of(position: &mut Position) -> Vec<String> {
        position
            .expand()
            .iter()
            .filter_map(|c| c.last_move)
            .map(|m| m.to_string())
            .collect()
    }

    fn perft(position: &mut Position, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        position
            .expand()
            .iter_mut()
            .map(|child| perft(child, depth - 1))
            .sum()
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let mut position = Position::startpos(Color::White);
        let moves = moves_of(&mut position);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.starts_with("e2")).count(), 2);
        assert!(moves.contains(&"b1c3".to_string()));
        assert!(moves.contains(&"g1f3".to_string()));
        assert!(moves.contains(&"a2a4".to_string()));
    }

    #[test]
    fn perft_matches_known_counts() {
        let mut position = Position::startpos(Color::White);
        assert_eq!(perft(&mut position, 1), 20);
        assert_eq!(perft(&mut position, 2), 400);
        assert_eq!(perft(&mut position, 3), 8902);
    }

    #[test]
    fn blocked_pawns_cannot_move() {
        let mut position =
            Position::from_fen("k7/8/8/8/4p3/4P3/8/K7 w - - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(moves.iter().all(|m| !m.starts_with("e3")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        // Black rook covers the whole e-file.
        let mut position =
            Position::from_fen("4r2k/8/8/8/8/8/8/3K4 w - - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(!moves.contains(&"d1e1".to_string()));
        assert!(!moves.contains(&"d1e2".to_string()));
        assert!(moves.contains(&"d1c1".to_string()));
    }

    #[test]
    fn pinned_piece_cannot_expose_the_king() {
        // The d2 rook shields the white king from the d8 rook.
        let mut position =
            Position::from_fen("3r3k/8/8/8/8/8/3R4/3K4 w - - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(moves.contains(&"d2d5".to_string()));
        assert!(moves.contains(&"d2d8".to_string()));
        assert!(!moves.contains(&"d2e2".to_string()));
        assert!(!moves.contains(&"d2a2".to_string()));
    }

    #[test]
    fn check_must_be_answered() {
        // Ke1 checked by the e8 rook: block, capture, or step aside.
        let mut position =
            Position::from_fen("4r2k/8/8/8/8/8/3B4/4K3 w - - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(moves.contains(&"d2e3".to_string()), "blocking is legal");
        assert!(moves.contains(&"e1d1".to_string()));
        assert!(!moves.contains(&"d2c3".to_string()), "must address the check");
    }

    #[test]
    fn king_may_never_be_captured() {
        // The black queen stands next to the white king but taking it is
        // not a move that exists.
        let mut position =
            Position::from_fen("7k/8/8/8/8/8/4q3/4K3 b - - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| *m != "e2e1"));
    }

    #[test]
    fn castling_both_sides_when_clear() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_blocked_by_any_piece_between() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_forbidden_while_in_check() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_forbidden_through_attacked_square() {
        // Black rook on f8 covers f1, the square the king crosses kingside;
        // the queenside path is untouched.
        let mut position =
            Position::from_fen("r4r2/k7/8/8/8/8/8/R3K2R w KQ - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut position);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn queenside_corner_square_may_be_attacked_but_not_occupied() {
        // The b8 rook covers b1, but the king never touches that square:
        // only its occupancy matters for the castle.
        let mut attacked =
            Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut attacked);
        assert!(moves.contains(&"e1c1".to_string()));

        let mut occupied =
            Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1", Color::White).unwrap();
        let moves = moves_of(&mut occupied);
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_rights_lost_after_king_moves() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::White).unwrap();
        let mut after = position
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("e1e2").unwrap()))
            .unwrap();
        let mut back = after
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("a8b8").unwrap()))
            .unwrap();
        let mut home = back
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("e2e1").unwrap()))
            .unwrap();
        let mut settled = home
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("b8a8").unwrap()))
            .unwrap();

        // King is back on e1 but has moved; no castle either way.
        let moves = moves_of(&mut settled);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut position = Position::startpos(Color::White);
        let mut a = position
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("e2e4").unwrap()))
            .unwrap();
        let mut b = a
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("a7a6").unwrap()))
            .unwrap();
        let mut c = b
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("e4e5").unwrap()))
            .unwrap();
        let mut d = c
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("d7d5").unwrap()))
            .unwrap();

        // The double step just happened: the capture is on.
        assert_eq!(d.en_passant, Some(Square::from_algebraic("d6").unwrap()));
        let moves = moves_of(&mut d);
        assert!(moves.contains(&"e5d6".to_string()));

        // One quiet move later it is gone.
        let mut e = d
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("a2a3").unwrap()))
            .unwrap();
        assert_eq!(e.en_passant, None);
        let mut f = e
            .expand()
            .into_iter()
            .find(|c| c.last_move == Some(Move::from_text("h7h6").unwrap()))
            .unwrap();
        let later = moves_of(&mut f);
        assert!(!later.contains(&"e5d6".to_string()));
    }

    #[test]
    fn promotion_push_and_capture_each_give_four_siblings() {
        // The pawn may capture into b8 or push to a8; both promote.
        let mut position =
            Position::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1", Color::White).unwrap();
        let children = position.expand();
        let pushes = children
            .iter()
            .filter(|c| c.last_move == Some(Move::from_text("a7a8").unwrap()))
            .count();
        let captures = children
            .iter()
            .filter(|c| c.last_move == Some(Move::from_text("a7b8").unwrap()))
            .count();
        assert_eq!(pushes, 4);
        assert_eq!(captures, 4);
    }

    #[test]
    fn stalemate_and_checkmate_tagging() {
        let mut stalemate =
            Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Color::White).unwrap();
        assert!(stalemate.expand().is_empty());
        assert_eq!(stalemate.outcome, Outcome::Draw);

        let mut mate = Position::from_fen("k7/1R6/1K6/8/8/8/8/R7 b - - 0 1", Color::White).unwrap();
        assert!(mate.expand().is_empty());
        assert_eq!(mate.outcome, Outcome::Checkmate);
    }
}
