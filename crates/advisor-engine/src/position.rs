//! Chess position representation and move application.
//!
//! A [`Position`] is the unit of search: the board, whose turn it is, both
//! sides' bookkeeping, and the heuristic score accumulated since the game
//! started. Applying a move never mutates the parent — every transition
//! builds a fresh position, with the `mine`/`theirs` labels swapped because
//! the side to move alternates.

use crate::attacks::{self, AttackMap};
use crate::board::{Board, Occupant, PieceId};
use crate::eval;
use crate::movegen;
use advisor_core::{Color, Fen, FenError, Move, Piece, Square};

/// How a position stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game goes on.
    Ongoing,
    /// The side to move has no legal moves and is not in check (stalemate).
    Draw,
    /// The side to move has no legal moves and is in check.
    Checkmate,
}

/// Everything one side carries besides its pieces on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideState {
    /// Piece id → current square, or `None` once captured.
    pub roster: [Option<Square>; PieceId::COUNT],
    /// Piece id → has this piece ever moved. Captured pieces read `true`.
    pub moved: [bool; PieceId::COUNT],
    /// How many of this side's pieces attack each square.
    pub attacks: AttackMap,
}

impl SideState {
    fn empty() -> Self {
        SideState {
            roster: [None; PieceId::COUNT],
            moved: [true; PieceId::COUNT],
            attacks: AttackMap::new(),
        }
    }

    /// The king's current square.
    pub fn king_square(&self) -> Square {
        self.roster[PieceId::KING.index()].expect("the king is never captured")
    }
}

/// One board state plus both sides' bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The mailbox board.
    pub board: Board,
    /// Whose turn it is.
    pub side_to_move: Color,
    /// State of the side to move.
    pub mine: SideState,
    /// State of the opponent.
    pub theirs: SideState,
    /// Square a pawn may capture into en passant, valid for exactly one ply.
    pub en_passant: Option<Square>,
    /// Heuristic score accumulated along the move chain, positive when the
    /// advised side stands better.
    pub score: i32,
    /// Resolved by the first [`Position::expand`] call.
    pub outcome: Outcome,
    /// The move that produced this position, if any.
    pub last_move: Option<Move>,
    /// The side the advisor plays for; fixes the sign of every score delta.
    pub player: Color,
}

/// Back-rank piece order in the standard setup; the file doubles as the
/// piece id, putting the king in slot 4.
const BACK_ROW: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Position {
    /// Builds the standard starting position, advising for `player`.
    pub fn startpos(player: Color) -> Self {
        let mut board = Board::empty();
        let mut sides = [SideState::empty(), SideState::empty()];

        for color in [Color::White, Color::Black] {
            let side = &mut sides[color.index()];
            for file in 0..8u8 {
                let back = Square::from_coords(color.back_rank(), file)
                    .expect("home squares are on the board");
                let id = PieceId::new(file).expect("file index is a valid slot");
                board.set(
                    back,
                    Occupant {
                        color,
                        id,
                        piece: BACK_ROW[file as usize],
                    },
                );
                side.roster[id.index()] = Some(back);
                side.moved[id.index()] = false;

                let front = Square::from_coords(color.pawn_rank(), file)
                    .expect("home squares are on the board");
                let pawn_id = PieceId::new(8 + file).expect("file index is a valid slot");
                board.set(
                    front,
                    Occupant {
                        color,
                        id: pawn_id,
                        piece: Piece::Pawn,
                    },
                );
                side.roster[pawn_id.index()] = Some(front);
                side.moved[pawn_id.index()] = false;
            }
        }

        sides[0].attacks = AttackMap::recompute(&board, Color::White);
        sides[1].attacks = AttackMap::recompute(&board, Color::Black);
        let [white, black] = sides;

        Position {
            board,
            side_to_move: Color::White,
            mine: white,
            theirs: black,
            en_passant: None,
            score: 0,
            outcome: Outcome::Ongoing,
            last_move: None,
            player,
        }
    }

    /// Builds a position from a FEN record, advising for `player`.
    ///
    /// FEN carries no per-piece history, so moved flags are derived: the
    /// king/rook pairs implied by the castling-rights field and pawns still
    /// on their starting rank count as unmoved, everything else as moved.
    /// The score starts at zero — it is relative to this position onward.
    pub fn from_fen(text: &str, player: Color) -> Result<Self, FenError> {
        let fen = Fen::parse(text)?;
        let mut board = Board::empty();
        let mut sides = [SideState::empty(), SideState::empty()];
        let mut used = [0u8; 2];

        for (sq, piece, color) in fen.pieces() {
            let ci = color.index();
            let id = if piece == Piece::King {
                if sides[ci].roster[PieceId::KING.index()].is_some() {
                    return Err(FenError::BadPlacement(format!("{} has two kings", color)));
                }
                PieceId::KING
            } else {
                if used[ci] >= PieceId::COUNT as u8 - 1 {
                    return Err(FenError::BadPlacement(format!(
                        "{} has more than {} pieces",
                        color,
                        PieceId::COUNT
                    )));
                }
                let slot = if used[ci] < PieceId::KING.index() as u8 {
                    used[ci]
                } else {
                    used[ci] + 1
                };
                used[ci] += 1;
                PieceId::new(slot).expect("slot index stays below the roster size")
            };
            board.set(sq, Occupant { color, id, piece });
            sides[ci].roster[id.index()] = Some(sq);
        }

        for color in [Color::White, Color::Black] {
            if sides[color.index()].roster[PieceId::KING.index()].is_none() {
                return Err(FenError::BadPlacement(format!("{} has no king", color)));
            }
        }

        // Pawns on their starting rank have evidently never moved.
        for (sq, occ) in board.occupants() {
            if occ.piece == Piece::Pawn && sq.rank_index() == occ.color.pawn_rank() {
                sides[occ.color.index()].moved[occ.id.index()] = false;
            }
        }

        // Castling rights imply an unmoved king and rook, when both actually
        // stand on their home squares.
        for c in fen.castling.chars() {
            let (color, rook_file) = match c {
                'K' => (Color::White, 7),
                'Q' => (Color::White, 0),
                'k' => (Color::Black, 7),
                'q' => (Color::Black, 0),
                _ => continue,
            };
            let back = color.back_rank();
            let king_home = Square::from_coords(back, 4).expect("home squares are on the board");
            let rook_home =
                Square::from_coords(back, rook_file).expect("home squares are on the board");
            let king_placed = matches!(
                board.get(king_home),
                Some(occ) if occ.color == color && occ.piece == Piece::King
            );
            let rook = board.get(rook_home);
            if let (true, Some(rook)) = (king_placed, rook) {
                if rook.color == color && rook.piece == Piece::Rook {
                    sides[color.index()].moved[PieceId::KING.index()] = false;
                    sides[color.index()].moved[rook.id.index()] = false;
                }
            }
        }

        sides[0].attacks = AttackMap::recompute(&board, Color::White);
        sides[1].attacks = AttackMap::recompute(&board, Color::Black);

        let side_to_move = if fen.side_to_move == 'w' {
            Color::White
        } else {
            Color::Black
        };
        let en_passant = if fen.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&fen.en_passant)
        };

        let [white, black] = sides;
        let (mine, theirs) = match side_to_move {
            Color::White => (white, black),
            Color::Black => (black, white),
        };

        Ok(Position {
            board,
            side_to_move,
            mine,
            theirs,
            en_passant,
            score: 0,
            outcome: Outcome::Ongoing,
            last_move: None,
            player,
        })
    }

    /// Serializes the position as FEN. Halfmove and fullmove counters are
    /// not modeled and always read `0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::from_coords(rank, file).expect("coords in range");
                match self.board.get(sq) {
                    Some(occ) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(occ.piece.to_fen_char(occ.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let mut any_rights = false;
        for (c, color, rook_file) in [
            ('K', Color::White, 7),
            ('Q', Color::White, 0),
            ('k', Color::Black, 7),
            ('q', Color::Black, 0),
        ] {
            if self.castle_right(color, rook_file) {
                fen.push(c);
                any_rights = true;
            }
        }
        if !any_rights {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }

    fn castle_right(&self, color: Color, rook_file: u8) -> bool {
        let back = color.back_rank();
        let side = self.side(color);
        let king_home = Square::from_coords(back, 4).expect("home squares are on the board");
        let king_ready = matches!(
            self.board.get(king_home),
            Some(occ) if occ.color == color && occ.piece == Piece::King
                && !side.moved[occ.id.index()]
        );
        let rook_home = Square::from_coords(back, rook_file).expect("home squares are on the board");
        let rook_ready = matches!(
            self.board.get(rook_home),
            Some(occ) if occ.color == color && occ.piece == Piece::Rook
                && !side.moved[occ.id.index()]
        );
        king_ready && rook_ready
    }

    /// Returns the bookkeeping for `color`.
    pub fn side(&self, color: Color) -> &SideState {
        if color == self.side_to_move {
            &self.mine
        } else {
            &self.theirs
        }
    }

    /// Returns true if the side to move's king is attacked.
    pub fn in_check(&self) -> bool {
        self.theirs.attacks.is_attacked(self.mine.king_square())
    }

    /// Returns true if the king of the side that made the last move is
    /// attacked — the move that produced this position was illegal.
    pub(crate) fn mover_king_attacked(&self) -> bool {
        self.mine.attacks.is_attacked(self.theirs.king_square())
    }

    /// Score sign for deltas applied by the side to move: positive when the
    /// advised side is moving.
    pub(crate) fn sign(&self) -> i32 {
        if self.side_to_move == self.player {
            1
        } else {
            -1
        }
    }

    /// Generates every legal successor position.
    ///
    /// Finding none settles the outcome: checkmate if the side to move is in
    /// check, stalemate draw otherwise, folding the terminal bonus into the
    /// score exactly once. Generation itself is deterministic, so repeated
    /// calls return equal sequences.
    pub fn expand(&mut self) -> Vec<Position> {
        let children = movegen::successors(self);
        if children.is_empty() && self.outcome == Outcome::Ongoing {
            let sign = self.sign();
            if self.in_check() {
                self.outcome = Outcome::Checkmate;
                self.score -= sign * eval::CHECKMATE_BONUS;
            } else {
                self.outcome = Outcome::Draw;
                self.score = self.score.div_euclid(eval::DRAW_DIVISOR);
            }
        }
        children
    }

    /// Applies a generated move, producing the successor position.
    ///
    /// The move must come out of successor generation; nothing is
    /// re-validated here. Promotions go through [`Position::apply_promotions`].
    pub(crate) fn apply(&self, mv: Move) -> Position {
        let sign = self.sign();
        let me = self.side_to_move;
        let opp = me.opposite();
        let mut t = self.begin();
        let mut score = self.score;

        // The attacked-piece terms are re-derived after the move; back the
        // current values out first.
        score += sign * t.attacked_piece_count(me);
        score -= sign * t.attacked_piece_count(opp);

        let mover = t.lift(mv.from());

        if t.board.is_occupied(mv.to()) {
            let victim = t.capture(mv.to());
            score += sign * victim.piece.material();
        } else if mover.piece == Piece::Pawn && self.en_passant == Some(mv.to()) {
            let bypassed = mv
                .to()
                .offset(-me.pawn_direction(), 0)
                .expect("the bypassed pawn square is on the board");
            let victim = t.capture(bypassed);
            score += sign * victim.piece.material();
        }

        // A two-square king move is a castle; bring the rook across.
        if mover.piece == Piece::King && mv.from().file_index().abs_diff(mv.to().file_index()) == 2
        {
            let rank = mv.from().rank_index();
            let (corner_file, rook_file) = if mv.to().file_index() == 2 {
                (0, 3)
            } else {
                (7, 5)
            };
            let corner =
                Square::from_coords(rank, corner_file).expect("castling stays on the back rank");
            let rook_to =
                Square::from_coords(rank, rook_file).expect("castling stays on the back rank");
            let rook = t.lift(corner);
            t.drop(rook_to, rook);
            t.moved[rook.color.index()][rook.id.index()] = true;
            score += sign * eval::CASTLE_BONUS;
        }

        // A pawn double step opens en passant for exactly the next ply.
        let en_passant = if mover.piece == Piece::Pawn
            && mv.from().rank_index().abs_diff(mv.to().rank_index()) == 2
        {
            Square::from_coords(
                (mv.from().rank_index() + mv.to().rank_index()) / 2,
                mv.from().file_index(),
            )
        } else {
            None
        };

        t.drop(mv.to(), mover);

        if !t.moved[me.index()][mover.id.index()] {
            score += sign * eval::development_bonus(mover.piece);
            t.moved[me.index()][mover.id.index()] = true;
        }

        score -= sign * t.attacked_piece_count(me);
        score += sign * t.attacked_piece_count(opp);

        t.finish(self, mv, en_passant, score)
    }

    /// Applies a pawn move onto the last rank, producing the four sibling
    /// positions (rook, knight, bishop, queen).
    ///
    /// The shared prefix — lifting the pawn and any capture — runs once;
    /// each branch then drops its own piece kind and finishes the attack and
    /// evaluation updates independently.
    pub(crate) fn apply_promotions(&self, mv: Move) -> Vec<Position> {
        let sign = self.sign();
        let me = self.side_to_move;
        let opp = me.opposite();
        let mut t = self.begin();
        let mut score = self.score;

        score += sign * t.attacked_piece_count(me);
        score -= sign * t.attacked_piece_count(opp);

        let pawn = t.lift(mv.from());

        if t.board.is_occupied(mv.to()) {
            let victim = t.capture(mv.to());
            score += sign * victim.piece.material();
        }

        Piece::PROMOTIONS
            .iter()
            .map(|&piece| {
                let mut branch = t.clone();
                branch.drop(mv.to(), Occupant { piece, ..pawn });
                let mut branch_score = score;
                branch_score -= sign * branch.attacked_piece_count(me);
                branch_score += sign * branch.attacked_piece_count(opp);
                branch.finish(self, mv, None, branch_score)
            })
            .collect()
    }

    fn begin(&self) -> Transition {
        let (white, black) = match self.side_to_move {
            Color::White => (&self.mine, &self.theirs),
            Color::Black => (&self.theirs, &self.mine),
        };
        Transition {
            board: self.board.clone(),
            roster: [white.roster, black.roster],
            moved: [white.moved, black.moved],
            attacks: [white.attacks.clone(), black.attacks.clone()],
        }
    }
}

/// Working copy of the board and both sides' bookkeeping, indexed by color
/// while a move is applied. The lift/drop primitives keep both attack maps
/// exact at every intermediate occupancy state.
#[derive(Clone)]
struct Transition {
    board: Board,
    roster: [[Option<Square>; PieceId::COUNT]; 2],
    moved: [[bool; PieceId::COUNT]; 2],
    attacks: [AttackMap; 2],
}

impl Transition {
    /// Takes the piece off `sq`: its own attacks disappear, and sliders of
    /// both sides now reach through the vacated square.
    fn lift(&mut self, sq: Square) -> Occupant {
        let occ = self.board.get(sq).expect("lift from an occupied square");
        attacks::piece_attacks(
            &mut self.attacks[occ.color.index()],
            &self.board,
            sq,
            occ.color,
            occ.piece,
            -1,
        );
        self.board.clear(sq);
        attacks::slide_through(&mut self.attacks, &self.board, sq, 1);
        occ
    }

    /// Puts a piece down on the empty square `sq`: sliders of both sides are
    /// cut at the square, then the piece's own attacks appear.
    fn drop(&mut self, sq: Square, occ: Occupant) {
        attacks::slide_through(&mut self.attacks, &self.board, sq, -1);
        self.board.set(sq, occ);
        attacks::piece_attacks(
            &mut self.attacks[occ.color.index()],
            &self.board,
            sq,
            occ.color,
            occ.piece,
            1,
        );
        self.roster[occ.color.index()][occ.id.index()] = Some(sq);
    }

    /// Removes a captured piece for good: off the board, roster slot
    /// cleared, moved flag pinned true so the slot is never revived.
    fn capture(&mut self, sq: Square) -> Occupant {
        let victim = self.lift(sq);
        self.roster[victim.color.index()][victim.id.index()] = None;
        self.moved[victim.color.index()][victim.id.index()] = true;
        victim
    }

    /// Total attack count the enemy lays on `of`'s surviving pieces.
    fn attacked_piece_count(&self, of: Color) -> i32 {
        let enemy = of.opposite();
        self.roster[of.index()]
            .iter()
            .flatten()
            .map(|&sq| self.attacks[enemy.index()].count(sq) as i32)
            .sum()
    }

    /// Assembles the successor position, relabeling mine/theirs for the new
    /// side to move and adding the check bonus when the move gives check.
    fn finish(self, parent: &Position, mv: Move, en_passant: Option<Square>, score: i32) -> Position {
        let sign = parent.sign();
        let next = parent.side_to_move.opposite();
        let Transition {
            board,
            roster,
            moved,
            attacks,
        } = self;
        let [white_attacks, black_attacks] = attacks;
        let white = SideState {
            roster: roster[Color::White.index()],
            moved: moved[Color::White.index()],
            attacks: white_attacks,
        };
        let black = SideState {
            roster: roster[Color::Black.index()],
            moved: moved[Color::Black.index()],
            attacks: black_attacks,
        };
        let (mine, theirs) = match next {
            Color::White => (white, black),
            Color::Black => (black, white),
        };

        let mut child = Position {
            board,
            side_to_move: next,
            mine,
            theirs,
            en_passant,
            score,
            outcome: Outcome::Ongoing,
            last_move: Some(mv),
            player: parent.player,
        };
        if child.in_check() {
            child.score += sign * eval::CHECK_BONUS;
        }
        child
    }
}
