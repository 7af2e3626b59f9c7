//! Heuristic evaluation constants.
//!
//! The score is a single running total carried along the move chain (see
//! [`crate::Position`]); these are the deltas each event contributes. All of
//! them are applied with a positive sign when the advised side causes the
//! event and a negative sign otherwise.

use advisor_core::Piece;

/// Added to the score when a side delivers checkmate.
pub const CHECKMATE_BONUS: i32 = 100;

/// A drawn game divides the accumulated score by this (floor division).
pub const DRAW_DIVISOR: i32 = 2;

/// Added when a move puts the opposing king in check.
pub const CHECK_BONUS: i32 = 3;

/// Added when a side castles.
pub const CASTLE_BONUS: i32 = 3;

/// One-time bonus for a piece's first move off its starting square.
pub const fn development_bonus(piece: Piece) -> i32 {
    match piece {
        Piece::Rook => 3,
        Piece::Knight => 2,
        Piece::Bishop => 2,
        Piece::Queen => 4,
        Piece::King => 0,
        Piece::Pawn => 1,
    }
}
