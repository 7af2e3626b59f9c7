//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    BadPlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    BadSideToMove(String),

    #[error("invalid castling rights: {0}")]
    BadCastling(String),

    #[error("invalid en passant square: {0}")]
    BadEnPassant(String),

    #[error("invalid move counter: {0}")]
    BadCounter(String),
}

/// The six raw fields of a FEN record, validated but not yet interpreted.
///
/// The engine converts this into its internal position representation;
/// this type only guarantees the text is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement, e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".
    pub placement: String,
    /// Side to move, 'w' or 'b'.
    pub side_to_move: char,
    /// Castling availability, e.g. "KQkq" or "-".
    pub castling: String,
    /// En passant target square, e.g. "e3" or "-".
    pub en_passant: String,
    /// Halfmove clock field.
    pub halfmove_clock: u32,
    /// Fullmove number field.
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        validate_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let castling = fields[2];
        if castling != "-" && (castling.is_empty() || !castling.chars().all(|c| "KQkq".contains(c)))
        {
            return Err(FenError::BadCastling(castling.to_string()));
        }

        let en_passant = fields[3];
        if en_passant != "-" {
            let square = Square::from_algebraic(en_passant)
                .ok_or_else(|| FenError::BadEnPassant(en_passant.to_string()))?;
            if square.rank_index() != 2 && square.rank_index() != 5 {
                return Err(FenError::BadEnPassant(en_passant.to_string()));
            }
        }

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::BadCounter(fields[4].to_string()))?;
        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::BadCounter(fields[5].to_string()))?;

        Ok(Fen {
            placement: fields[0].to_string(),
            side_to_move,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Iterates over the occupied squares of the placement field, yielding
    /// `(square, piece, color)` in scan order (rank 8 down to rank 1).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, crate::Color)> + '_ {
        self.placement.split('/').enumerate().flat_map(|(i, row)| {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            row.chars().filter_map(move |c| {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    None
                } else {
                    let (piece, color) = Piece::from_fen_char(c)?;
                    let square = Square::from_coords(rank, file)?;
                    file += 1;
                    Some((square, piece, color))
                }
            })
        })
    }
}

fn validate_placement(placement: &str) -> Result<(), FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadPlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    for (i, row) in rows.iter().enumerate() {
        let mut squares = 0u32;
        for c in row.chars() {
            match c.to_digit(10) {
                Some(n) if (1..=8).contains(&n) => squares += n,
                Some(_) => {
                    return Err(FenError::BadPlacement(format!(
                        "invalid digit '{}' in rank {}",
                        c,
                        8 - i
                    )))
                }
                None if Piece::from_fen_char(c).is_some() => squares += 1,
                None => {
                    return Err(FenError::BadPlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )))
                }
            }
        }
        if squares != 8 {
            return Err(FenError::BadPlacement(format!(
                "rank {} covers {} squares, expected 8",
                8 - i,
                squares
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, 'w');
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, "-");
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.pieces().count(), 32);
    }

    #[test]
    fn pieces_iterator_order_and_coords() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        let first = fen.pieces().next().unwrap();
        assert_eq!(first.0.to_algebraic(), "a8");
        assert_eq!(first.1, Piece::Rook);
        assert_eq!(first.2, Color::Black);

        let last = fen.pieces().last().unwrap();
        assert_eq!(last.0.to_algebraic(), "h1");
        assert_eq!(last.1, Piece::Rook);
        assert_eq!(last.2, Color::White);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        assert_eq!(fen.pieces().count(), 32);
    }

    #[test]
    fn field_count_errors() {
        assert!(matches!(Fen::parse("invalid"), Err(FenError::FieldCount(1))));
        assert!(matches!(Fen::parse(""), Err(FenError::FieldCount(0))));
    }

    #[test]
    fn placement_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::BadPlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::BadPlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::BadPlacement(_))
        ));
        assert!(matches!(
            Fen::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::BadPlacement(_))
        ));
    }

    #[test]
    fn side_to_move_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::BadSideToMove(_))
        ));
    }

    #[test]
    fn castling_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::BadCastling(_))
        ));
    }

    #[test]
    fn en_passant_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - abc 0 1"),
            Err(FenError::BadEnPassant(_))
        ));
        // Only ranks 3 and 6 are valid en passant targets.
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(FenError::BadEnPassant(_))
        ));
    }

    #[test]
    fn counter_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::BadCounter(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::BadCounter(_))
        ));
    }

    #[test]
    fn en_passant_target_accepted() {
        let fen =
            Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(fen.en_passant, "e3");
        assert_eq!(fen.side_to_move, 'b');
    }
}
