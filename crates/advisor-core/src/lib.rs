//! Core types for the chess advisor.
//!
//! This crate provides the fundamental types used across the engine and the
//! terminal front end:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for origin/destination move pairs
//! - [`Fen`] parsing for custom starting positions

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
