//! Mailbox board representation.

use advisor_core::{Color, Piece, Square};
use std::fmt;

/// Identifier of a piece within one side's sixteen starting slots.
///
/// The id stays with a piece for its whole life: it survives movement and
/// promotion, and once the piece is captured its roster slot is cleared and
/// the id never reappears on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// Number of piece slots per side.
    pub const COUNT: usize = 16;

    /// The slot the king occupies in the standard setup. FEN setup also
    /// assigns the king here so the king square is always one roster read.
    pub const KING: PieceId = PieceId(4);

    /// Creates an id from a slot index (0-15).
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(PieceId(index))
        } else {
            None
        }
    }

    /// Returns the slot index (0-15).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All sixteen ids in slot order.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..Self::COUNT as u8).map(PieceId)
    }
}

/// A piece standing on a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub color: Color,
    pub id: PieceId,
    pub piece: Piece,
}

/// An 8x8 mailbox: every square is either empty or holds one [`Occupant`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Occupant>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Returns the occupant of a square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Occupant> {
        self.squares[sq.index()]
    }

    /// Returns true if the square holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Returns true if the square holds a piece.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Places an occupant on a square.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.index()] = Some(occupant);
    }

    /// Empties a square.
    #[inline]
    pub(crate) fn clear(&mut self, sq: Square) {
        self.squares[sq.index()] = None;
    }

    /// Iterates over all occupied squares.
    pub fn occupants(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|occ| (sq, occ)))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_coords(rank, file).expect("coords in range");
                match self.get(sq) {
                    Some(occ) => write!(f, "{}", occ.piece.to_fen_char(occ.color))?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn piece_id_bounds() {
        assert!(PieceId::new(0).is_some());
        assert!(PieceId::new(15).is_some());
        assert!(PieceId::new(16).is_none());
        assert_eq!(PieceId::all().count(), PieceId::COUNT);
    }

    #[test]
    fn set_get_clear() {
        let mut board = Board::empty();
        let occ = Occupant {
            color: Color::White,
            id: PieceId::new(3).unwrap(),
            piece: Piece::Queen,
        };
        assert!(board.is_empty(sq("d4")));

        board.set(sq("d4"), occ);
        assert_eq!(board.get(sq("d4")), Some(occ));
        assert!(board.is_occupied(sq("d4")));

        board.clear(sq("d4"));
        assert!(board.is_empty(sq("d4")));
    }

    #[test]
    fn occupants_iteration() {
        let mut board = Board::empty();
        board.set(
            sq("a1"),
            Occupant {
                color: Color::White,
                id: PieceId::new(0).unwrap(),
                piece: Piece::Rook,
            },
        );
        board.set(
            sq("h8"),
            Occupant {
                color: Color::Black,
                id: PieceId::new(7).unwrap(),
                piece: Piece::Rook,
            },
        );
        let all: Vec<_> = board.occupants().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, sq("a1"));
        assert_eq!(all[1].0, sq("h8"));
    }
}
