//! Rule engine: legality, check, castling, promotion and game end
//!
//! The engine borrows a board and answers questions about it. Every answer
//! is a boolean (or an `Option`), never an error: an illegal move and a
//! nonsensical one look the same to the caller.
//!
//! King-safety questions are answered on a scratch copy of the board, so the
//! live board is never mutated by a query and no piece picks up a stray
//! "moved" flag from a probe.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Column the king starts on.
const KING_COL: u8 = 4;

/// Where the game stands from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    fn from_target(king_from: Square, to: Square) -> Option<Self> {
        if to.row() != king_from.row() {
            return None;
        }
        match to.col() {
            6 => Some(CastleSide::King),
            2 => Some(CastleSide::Queen),
            _ => None,
        }
    }

    fn rook_from_col(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    fn rook_to_col(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// Columns that must be empty between king and rook.
    fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        }
    }
}

/// A copy of the board with one speculative relocation applied.
struct Probe {
    board: Board,
}

impl Probe {
    fn relocate(board: &Board, from: Square, to: Square) -> Self {
        let mut scratch = board.clone();
        let piece = scratch.get(from);
        scratch.set(to, piece);
        scratch.set(from, None);
        Self { board: scratch }
    }

    fn leaves_in_check(&self, color: Color) -> bool {
        king_attacker(&self.board, color).is_some()
    }
}

/// First opposing piece, row-major, whose raw movement reaches `color`'s king.
///
/// Never consults full legality; a missing king is never attacked.
fn king_attacker(board: &Board, color: Color) -> Option<Square> {
    let king = board.find_king(color)?;
    let enemy = color.opposite();
    board
        .pieces()
        .find(|(sq, piece)| piece.color() == enemy && piece.pseudo_legal_move(*sq, king, board))
        .map(|(sq, _)| sq)
}

pub struct RuleEngine<'a> {
    board: &'a Board,
}

impl<'a> RuleEngine<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// Whether `color` may legally move the piece on `from` to `to`.
    ///
    /// A king stepping two files along its row is treated as a castling
    /// request and judged by [`RuleEngine::can_castle`] alone.
    pub fn is_move_valid(&self, from: Square, to: Square, color: Color) -> bool {
        let Some(piece) = self.board.get(from) else {
            return false;
        };
        if piece.color() != color {
            return false;
        }

        if is_castle_attempt(&piece, from, to) {
            return self.can_castle(from, to, color);
        }

        if !piece.pseudo_legal_move(from, to, self.board) {
            return false;
        }
        if self.board.get(to).is_some_and(|t| t.color() == color) {
            return false;
        }

        !Probe::relocate(self.board, from, to).leaves_in_check(color)
    }

    /// Label form of [`RuleEngine::is_move_valid`]; malformed labels are never valid.
    pub fn is_move_valid_label(&self, from: &str, to: &str, color: Color) -> bool {
        match (from.parse(), to.parse()) {
            (Ok(from), Ok(to)) => self.is_move_valid(from, to, color),
            _ => false,
        }
    }

    pub fn is_check(&self, color: Color) -> bool {
        king_attacker(self.board, color).is_some()
    }

    /// Square of a piece currently giving check to `color`, if any.
    pub fn check_source(&self, color: Color) -> Option<Square> {
        king_attacker(self.board, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_check(color) && !self.has_legal_move(color)
    }

    pub fn status(&self, color: Color) -> GameStatus {
        match (self.is_check(color), self.has_legal_move(color)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Every square the piece on `from` may legally move to.
    pub fn legal_destinations(&self, from: Square, color: Color) -> Vec<Square> {
        Square::all()
            .filter(|&to| self.is_move_valid(from, to, color))
            .collect()
    }

    /// Stops at the first legal move found.
    fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color() == color)
            .any(|(from, _)| Square::all().any(|to| self.is_move_valid(from, to, color)))
    }

    /// Whether the king on `from` may castle to `to`.
    ///
    /// Only the king's current square and its landing square are checked for
    /// attacks; the square it crosses is not.
    pub fn can_castle(&self, from: Square, to: Square, color: Color) -> bool {
        let row = color.back_row();
        let Some(king) = self.board.get(from) else {
            return false;
        };
        if king.kind() != PieceKind::King || king.color() != color || king.has_moved() {
            return false;
        }
        if from != Square::at(row, KING_COL) {
            return false;
        }
        let Some(side) = CastleSide::from_target(from, to) else {
            return false;
        };

        let rook_ok = self.board.get(Square::at(row, side.rook_from_col())).is_some_and(|rook| {
            rook.kind() == PieceKind::Rook && !rook.has_moved() && rook.color() == color
        });
        if !rook_ok {
            return false;
        }

        if side
            .between_cols()
            .iter()
            .any(|&col| self.board.get(Square::at(row, col)).is_some())
        {
            return false;
        }

        if self.is_check(color) {
            return false;
        }

        !Probe::relocate(self.board, from, to).leaves_in_check(color)
    }

    /// The rook's `(from, to)` for a castle of the king from `from` to `to`.
    ///
    /// Pure geometry; call [`RuleEngine::can_castle`] first.
    pub fn castle_rook_move(&self, from: Square, to: Square, color: Color) -> Option<(Square, Square)> {
        let row = color.back_row();
        if from != Square::at(row, KING_COL) {
            return None;
        }
        let side = CastleSide::from_target(from, to)?;
        Some((
            Square::at(row, side.rook_from_col()),
            Square::at(row, side.rook_to_col()),
        ))
    }

    /// A pawn standing on its far rank.
    pub fn should_promote(&self, square: Square, piece: &Piece) -> bool {
        piece.kind() == PieceKind::Pawn && square.row() == piece.color().promotion_row()
    }

    /// Promotion always yields a new queen.
    pub fn promote_pawn(&self, color: Color) -> Piece {
        Piece::new(PieceKind::Queen, color)
    }
}

/// A king moving exactly two files along its own row.
pub(crate) fn is_castle_attempt(piece: &Piece, from: Square, to: Square) -> bool {
    piece.kind() == PieceKind::King
        && from.row() == to.row()
        && (to.col() as i8 - from.col() as i8).abs() == 2
}
