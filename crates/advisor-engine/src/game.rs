//! Game session: the current position, move history, and the advising
//! searcher.

use crate::position::{Outcome, Position};
use crate::search::{SearchResult, Searcher};
use advisor_core::{Color, FenError, Move, Piece};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not among the current position's legal successors.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// The game has already ended.
    #[error("the game has already ended")]
    GameOver,
    /// The move promotes, but not to this piece.
    #[error("cannot promote to {0}")]
    InvalidPromotion(Piece),
}

/// A running game with one advised side.
///
/// The session owns the current [`Position`] together with its expansion, so
/// legality checks and game-over detection never regenerate moves, and
/// applying a move is picking one of the already-built successors.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    children: Vec<Position>,
    moves: Vec<Move>,
    searcher: Searcher,
}

impl Game {
    /// Starts a fresh game from the standard position, advising `player`.
    pub fn new(player: Color) -> Self {
        Self::from_position(Position::startpos(player))
    }

    /// Starts a game from a FEN string, advising `player`.
    pub fn from_fen(fen: &str, player: Color) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen, player)?))
    }

    /// Starts a game from an arbitrary position.
    pub fn from_position(mut position: Position) -> Self {
        let children = position.expand();
        Game {
            position,
            children,
            moves: Vec::new(),
            searcher: Searcher::default(),
        }
    }

    /// Replaces the searcher with one of the given depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.searcher = Searcher::new(depth);
        self
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The side the advisor plays for.
    pub fn player(&self) -> Color {
        self.position.player
    }

    /// The current outcome (settled; the position is always expanded).
    pub fn outcome(&self) -> Outcome {
        self.position.outcome
    }

    /// Returns true once the game reached checkmate or a draw.
    pub fn is_game_over(&self) -> bool {
        self.outcome() != Outcome::Ongoing
    }

    /// All legal moves in the current position. A promotion shows up once
    /// even though it stands for four successor positions.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = self.children.iter().filter_map(|c| c.last_move).collect();
        moves.dedup();
        moves
    }

    /// Returns true if this move is a pawn promotion.
    pub fn is_promotion(&self, mv: Move) -> bool {
        self.children
            .iter()
            .filter(|c| c.last_move == Some(mv))
            .count()
            > 1
    }

    /// Runs the searcher against the current position.
    pub fn recommend_move(&mut self) -> SearchResult {
        self.searcher.select_move(&self.position)
    }

    /// Positions visited by all searches so far.
    pub fn nodes_total(&self) -> u64 {
        self.searcher.nodes_total()
    }

    /// Moves made by the advised side, in order.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Plays a move; promotions pick the queen.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        self.make_move_promoting(mv, Piece::Queen)
    }

    /// Plays a move, promoting to `promotion` when the move is a promotion.
    ///
    /// The move must be one of the current legal successors; anything else
    /// is a caller bug and is rejected without touching the position.
    pub fn make_move_promoting(&mut self, mv: Move, promotion: Piece) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let matching: Vec<usize> = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.last_move == Some(mv))
            .map(|(i, _)| i)
            .collect();

        let index = match matching.len() {
            0 => return Err(GameError::IllegalMove(mv)),
            1 => matching[0],
            // Promotion siblings: pick the one holding the wanted piece.
            _ => *matching
                .iter()
                .find(|&&i| {
                    self.children[i].board.get(mv.to()).map(|occ| occ.piece) == Some(promotion)
                })
                .ok_or(GameError::InvalidPromotion(promotion))?,
        };

        let mover = self.position.side_to_move;
        self.position = self.children.swap_remove(index);
        self.children = self.position.expand();
        if mover == self.player() {
            self.moves.push(mv);
        }
        Ok(())
    }
}
