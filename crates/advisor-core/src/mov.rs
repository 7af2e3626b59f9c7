//! Move representation.

use crate::Square;
use std::fmt;

/// A chess move: an origin square and a destination square.
///
/// Castling and promotion carry no flag here. A two-square king move is a
/// castle, and a pawn arriving on the last rank promotes; both are resolved
/// by the engine from board state when the move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Parses a move from coordinate text such as "e2e4".
    pub fn from_text(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Some(Move { from, to })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_accessors() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4);
        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
    }

    #[test]
    fn move_from_text() {
        let m = Move::from_text("e2e4").unwrap();
        assert_eq!(m.from().to_algebraic(), "e2");
        assert_eq!(m.to().to_algebraic(), "e4");

        assert!(Move::from_text("e2").is_none());
        assert!(Move::from_text("e2e9").is_none());
        assert!(Move::from_text("i2e4").is_none());
        assert!(Move::from_text("e2e4q").is_none());
    }

    #[test]
    fn move_display() {
        let m = Move::from_text("g1f3").unwrap();
        assert_eq!(format!("{}", m), "g1f3");
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
    }
}
