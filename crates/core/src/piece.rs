//! Pieces and their movement geometry
//!
//! Each piece knows only its own pseudo-legal movement: geometry plus path
//! and destination occupancy. Whether a move exposes the mover's king is the
//! rule engine's business.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::color::Color;
use crate::square::Square;

static NEXT_PIECE_ID: AtomicU32 = AtomicU32::new(1);

/// The six piece types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// FEN letter, upper case for white.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// Identity of a piece. Two pieces of the same kind and color are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    has_moved: bool,
}

impl Piece {
    /// Creates a fresh, unmoved piece with its own identity.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            id: PieceId(NEXT_PIECE_ID.fetch_add(1, Ordering::Relaxed)),
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Set once by the board's move primitive, never cleared.
    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    pub fn to_char(&self) -> char {
        self.kind.to_char(self.color)
    }

    /// Whether `from -> to` fits this piece's movement geometry on `board`.
    ///
    /// Ignores king safety. Castling is not a king move here.
    pub fn pseudo_legal_move(&self, from: Square, to: Square, board: &Board) -> bool {
        if from == to {
            return false;
        }
        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;
        let straight = (d_row == 0) != (d_col == 0);
        let diagonal = d_row.abs() == d_col.abs();

        match self.kind {
            PieceKind::Pawn => self.pawn_move(from, to, d_row, d_col, board),
            PieceKind::Knight => {
                matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1)) && self.can_land(to, board)
            }
            PieceKind::Bishop => diagonal && board.path_clear(from, to) && self.can_land(to, board),
            PieceKind::Rook => straight && board.path_clear(from, to) && self.can_land(to, board),
            PieceKind::Queen => {
                (straight || diagonal) && board.path_clear(from, to) && self.can_land(to, board)
            }
            PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1 && self.can_land(to, board),
        }
    }

    fn pawn_move(&self, from: Square, to: Square, d_row: i8, d_col: i8, board: &Board) -> bool {
        let dir = self.color.forward();
        let target = board.get(to);

        if d_col == 0 {
            if d_row == dir {
                return target.is_none();
            }
            if d_row == 2 * dir && from.row() == self.color.pawn_row() {
                let middle_empty = from.offset(dir, 0).is_some_and(|mid| board.get(mid).is_none());
                return target.is_none() && middle_empty;
            }
            false
        } else if d_col.abs() == 1 && d_row == dir {
            target.is_some_and(|t| t.color != self.color)
        } else {
            false
        }
    }

    /// Destination is empty or holds an opposing piece.
    fn can_land(&self, to: Square, board: &Board) -> bool {
        board.get(to).map_or(true, |t| t.color != self.color)
    }
}
