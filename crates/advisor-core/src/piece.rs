//! Chess piece representation.

use crate::Color;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Rook = 0,
    Knight = 1,
    Bishop = 2,
    Queen = 3,
    King = 4,
    Pawn = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Rook,
        Piece::Knight,
        Piece::Bishop,
        Piece::Queen,
        Piece::King,
        Piece::Pawn,
    ];

    /// Piece types a pawn may promote to, in generation order.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Rook, Piece::Knight, Piece::Bishop, Piece::Queen];

    /// Material value in pawns. The king carries no material value; it can
    /// never be captured.
    #[inline]
    pub const fn material(self) -> i32 {
        match self {
            Piece::Rook => 5,
            Piece::Knight => 3,
            Piece::Bishop => 3,
            Piece::Queen => 9,
            Piece::King => 0,
            Piece::Pawn => 1,
        }
    }

    /// Returns true if this piece attacks along full rays (bishop, rook, queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Returns true if this piece slides along ranks and files.
    #[inline]
    pub const fn slides_straight(self) -> bool {
        matches!(self, Piece::Rook | Piece::Queen)
    }

    /// Returns true if this piece slides along diagonals.
    #[inline]
    pub const fn slides_diagonal(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Queen)
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_values() {
        assert_eq!(Piece::Rook.material(), 5);
        assert_eq!(Piece::Knight.material(), 3);
        assert_eq!(Piece::Bishop.material(), 3);
        assert_eq!(Piece::Queen.material(), 9);
        assert_eq!(Piece::King.material(), 0);
        assert_eq!(Piece::Pawn.material(), 1);
    }

    #[test]
    fn slider_classification() {
        assert!(Piece::Rook.is_slider());
        assert!(Piece::Bishop.is_slider());
        assert!(Piece::Queen.is_slider());
        assert!(!Piece::Knight.is_slider());
        assert!(!Piece::King.is_slider());
        assert!(!Piece::Pawn.is_slider());

        assert!(Piece::Rook.slides_straight());
        assert!(!Piece::Rook.slides_diagonal());
        assert!(Piece::Bishop.slides_diagonal());
        assert!(!Piece::Bishop.slides_straight());
        assert!(Piece::Queen.slides_straight());
        assert!(Piece::Queen.slides_diagonal());
    }

    #[test]
    fn promotions_exclude_king_and_pawn() {
        assert_eq!(Piece::PROMOTIONS.len(), 4);
        assert!(!Piece::PROMOTIONS.contains(&Piece::King));
        assert!(!Piece::PROMOTIONS.contains(&Piece::Pawn));
    }

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(Piece::King.to_fen_char(Color::White), 'K');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(Piece::from_fen_char('P'), Some((Piece::Pawn, Color::White)));
        assert_eq!(Piece::from_fen_char('p'), Some((Piece::Pawn, Color::Black)));
        assert_eq!(Piece::from_fen_char('K'), Some((Piece::King, Color::White)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }
}
