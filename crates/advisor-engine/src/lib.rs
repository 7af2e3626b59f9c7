//! Chess advisor engine.
//!
//! This crate provides:
//! - [`Position`] - one board state with per-side rosters, moved flags, and
//!   incrementally maintained attack maps
//! - [`Position::expand`] - legal successor generation, which doubles as
//!   checkmate/stalemate detection
//! - [`Searcher`] - depth-bounded minimax with alpha-beta pruning
//! - [`Game`] - a running session with history and an advised side
//!
//! # Architecture
//!
//! The board is a plain 8x8 mailbox. Each side additionally carries a
//! sixteen-slot roster (piece id → square), per-piece moved flags, and an
//! [`AttackMap`] counting how many of its pieces bear on every square. Move
//! application never recomputes the maps; it lifts and drops pieces with
//! exact incremental updates, including sliding attacks discovered or cut
//! when a square changes occupancy. Every transition allocates a fresh
//! position, so search siblings never share mutable state.
//!
//! # Example
//!
//! ```
//! use advisor_core::Color;
//! use advisor_engine::Game;
//!
//! let mut game = Game::new(Color::White).with_depth(2);
//! let recommendation = game.recommend_move();
//! let best = recommendation.best_move.expect("the opening offers moves");
//! game.make_move(best).unwrap();
//! println!("advised {best}, visited {} positions", recommendation.nodes);
//! ```

mod attacks;
mod board;
mod eval;
mod game;
mod movegen;
mod position;
mod search;

pub use attacks::AttackMap;
pub use board::{Board, Occupant, PieceId};
pub use eval::{development_bonus, CASTLE_BONUS, CHECKMATE_BONUS, CHECK_BONUS, DRAW_DIVISOR};
pub use game::{Game, GameError};
pub use position::{Outcome, Position, SideState};
pub use search::{SearchResult, Searcher};
