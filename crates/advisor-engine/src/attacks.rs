//! Per-side attack-count bookkeeping.
//!
//! Each side owns an [`AttackMap`]: for every square, how many of that side's
//! pieces could capture there right now. Pawn diagonals count, pawn pushes do
//! not, and a ray includes the first occupied square it hits. The maps are
//! maintained incrementally as pieces lift off and drop onto squares; a
//! from-scratch [`AttackMap::recompute`] defines the ground truth.

use crate::board::Board;
use advisor_core::{Color, Piece, Square};

/// Rank/file ray directions (rook, queen).
pub(crate) const STRAIGHT_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions (bishop, queen).
pub(crate) const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The eight one-square king steps.
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// The eight knight jumps.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Counts, for one side, how many of its pieces attack each square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackMap {
    counts: [u8; 64],
}

impl AttackMap {
    /// Creates a map with no attacks.
    pub const fn new() -> Self {
        AttackMap { counts: [0; 64] }
    }

    /// Returns the number of attackers on a square.
    #[inline]
    pub fn count(&self, sq: Square) -> u8 {
        self.counts[sq.index()]
    }

    /// Returns true if at least one piece attacks the square.
    #[inline]
    pub fn is_attacked(&self, sq: Square) -> bool {
        self.counts[sq.index()] > 0
    }

    #[inline]
    pub(crate) fn bump(&mut self, sq: Square, delta: i8) {
        let cell = &mut self.counts[sq.index()];
        *cell = cell.wrapping_add_signed(delta);
    }

    /// Rebuilds the map for `color` by scanning the whole board.
    ///
    /// Used at setup, and by tests as the oracle the incremental updates
    /// must agree with.
    pub fn recompute(board: &Board, color: Color) -> Self {
        let mut map = AttackMap::new();
        for (sq, occ) in board.occupants() {
            if occ.color == color {
                piece_attacks(&mut map, board, sq, occ.color, occ.piece, 1);
            }
        }
        map
    }
}

impl Default for AttackMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds (`delta` = +1) or removes (−1) the attack pattern of a single piece
/// standing on `origin`. Ray walks read blockers from `board`; the origin
/// square's own occupancy is irrelevant.
pub(crate) fn piece_attacks(
    map: &mut AttackMap,
    board: &Board,
    origin: Square,
    color: Color,
    piece: Piece,
    delta: i8,
) {
    match piece {
        Piece::Rook => ray_attacks(map, board, origin, &STRAIGHT_DIRS, delta),
        Piece::Bishop => ray_attacks(map, board, origin, &DIAGONAL_DIRS, delta),
        Piece::Queen => {
            ray_attacks(map, board, origin, &STRAIGHT_DIRS, delta);
            ray_attacks(map, board, origin, &DIAGONAL_DIRS, delta);
        }
        Piece::Knight => step_attacks(map, origin, &KNIGHT_JUMPS, delta),
        Piece::King => step_attacks(map, origin, &KING_STEPS, delta),
        Piece::Pawn => {
            let up = color.pawn_direction();
            for df in [-1, 1] {
                if let Some(sq) = origin.offset(up, df) {
                    map.bump(sq, delta);
                }
            }
        }
    }
}

fn ray_attacks(map: &mut AttackMap, board: &Board, origin: Square, dirs: &[(i8, i8)], delta: i8) {
    for &(dr, df) in dirs {
        let mut sq = origin;
        while let Some(next) = sq.offset(dr, df) {
            map.bump(next, delta);
            if board.is_occupied(next) {
                break;
            }
            sq = next;
        }
    }
}

fn step_attacks(map: &mut AttackMap, origin: Square, steps: &[(i8, i8)], delta: i8) {
    for &(dr, df) in steps {
        if let Some(sq) = origin.offset(dr, df) {
            map.bump(sq, delta);
        }
    }
}

/// Extends (`delta` = +1) or retracts (−1) the sliding attacks of both sides
/// that pass through `through`, whose occupancy is changing.
///
/// Must be called while `through` is empty on `board`: right after the square
/// is vacated (+1, rays now see through it) or right before it is filled
/// (−1, rays are about to be cut). The square itself stays attacked either
/// way — only the squares beyond it change.
pub(crate) fn slide_through(maps: &mut [AttackMap; 2], board: &Board, through: Square, delta: i8) {
    for &(dr, df) in STRAIGHT_DIRS.iter().chain(DIAGONAL_DIRS.iter()) {
        let straight = dr == 0 || df == 0;

        // Nearest piece in this direction; only a slider moving on this kind
        // of ray reaches through the square.
        let mut sq = through;
        let slider = loop {
            match sq.offset(dr, df) {
                None => break None,
                Some(next) => match board.get(next) {
                    Some(occ) => break Some(occ),
                    None => sq = next,
                },
            }
        };
        let Some(occ) = slider else { continue };
        let reaches = if straight {
            occ.piece.slides_straight()
        } else {
            occ.piece.slides_diagonal()
        };
        if !reaches {
            continue;
        }

        // Its ray stopped at `through`; adjust the far side up to and
        // including the next blocker.
        let mut sq = through;
        while let Some(next) = sq.offset(-dr, -df) {
            maps[occ.color.index()].bump(next, delta);
            if board.is_occupied(next) {
                break;
            }
            sq = next;
        }
    }
}
