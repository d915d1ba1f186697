//! Board state
//!
//! A plain 8x8 grid of occupants. The grid is the single source of truth:
//! label lookups are converted to coordinates on demand, so there is no
//! second index to keep in sync. The board knows nothing about turns or
//! legality.

use std::fmt;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with every piece on its starting square.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Square::at(0, col), Some(Piece::new(*kind, Color::Black)));
            board.set(Square::at(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.set(Square::at(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Square::at(7, col), Some(Piece::new(*kind, Color::White)));
        }
        board
    }

    pub fn empty() -> Self {
        Self { grid: [[None; 8]; 8] }
    }

    /// Builds a board from the piece-placement field of a FEN string.
    ///
    /// Only the first whitespace-separated field is read. Loaded pieces are unmoved.
    pub fn from_placement(fen: &str) -> Result<Self> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| Error::InvalidFen("empty placement".into()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(Error::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Self::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u8;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || col as u32 + skip > 8 {
                        return Err(Error::InvalidFen(format!(
                            "bad empty-square count '{}' in rank {}",
                            c,
                            8 - row
                        )));
                    }
                    col += skip as u8;
                    continue;
                }
                let (kind, color) = PieceKind::from_char(c)
                    .ok_or_else(|| Error::InvalidFen(format!("unknown piece '{}'", c)))?;
                let square = Square::new(row as u8, col)
                    .ok_or_else(|| Error::InvalidFen(format!("rank {} is too long", 8 - row)))?;
                board.set(square, Some(Piece::new(kind, color)));
                col += 1;
            }
            if col != 8 {
                return Err(Error::InvalidFen(format!(
                    "rank {} covers {} files",
                    8 - row,
                    col
                )));
            }
        }
        Ok(board)
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Occupant at `(row, col)`; `None` for empty or off-board coordinates.
    pub fn piece_at(&self, row: u8, col: u8) -> Option<Piece> {
        Square::new(row, col).and_then(|sq| self.get(sq))
    }

    /// Occupant at an algebraic label; malformed labels read as empty.
    pub fn get_label(&self, label: &str) -> Option<Piece> {
        label.parse().ok().and_then(|sq| self.get(sq))
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.row() as usize][square.col() as usize] = piece;
    }

    pub fn set_label(&mut self, label: &str, piece: Option<Piece>) -> Result<()> {
        let square = label.parse()?;
        self.set(square, piece);
        Ok(())
    }

    /// Relocates the occupant of `from` to `to` and marks it as moved.
    ///
    /// No legality check. Does nothing when `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let Some(mut piece) = self.get(from) else {
            return;
        };
        piece.mark_moved();
        self.set(from, None);
        self.set(to, Some(piece));
    }

    pub fn move_piece_label(&mut self, from: &str, to: &str) -> Result<()> {
        self.move_piece(from.parse()?, to.parse()?);
        Ok(())
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind() == PieceKind::King && p.color() == color)
            .map(|(sq, _)| sq)
    }

    /// True when every square strictly between `from` and `to` is empty.
    ///
    /// Only meaningful for straight or diagonal lines.
    pub(crate) fn path_clear(&self, from: Square, to: Square) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).signum();
        let d_col = (to.col() as i8 - from.col() as i8).signum();
        let mut current = from.offset(d_row, d_col);
        while let Some(sq) = current {
            if sq == to {
                return true;
            }
            if self.get(sq).is_some() {
                return false;
            }
            current = sq.offset(d_row, d_col);
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self.piece_at(row, col).map_or('.', |p| p.to_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);

        let king = board.get_label("e1").unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(king.color(), Color::White);
        assert!(!king.has_moved());

        assert_eq!(board.get_label("d8").unwrap().kind(), PieceKind::Queen);
        assert_eq!(board.piece_at(1, 3).unwrap().kind(), PieceKind::Pawn);
        assert!(board.get_label("e4").is_none());
    }

    #[test]
    fn test_label_and_coordinate_views_agree() {
        let mut board = Board::new();
        board.move_piece(sq("g1"), sq("f3"));
        board.set_label("c4", Some(Piece::new(PieceKind::Bishop, Color::White))).unwrap();

        for square in Square::all() {
            assert_eq!(
                board.piece_at(square.row(), square.col()),
                board.get_label(&square.label())
            );
        }
    }

    #[test]
    fn test_move_piece_relocates_and_marks_moved() {
        let mut board = Board::new();
        let knight = board.get(sq("g1")).unwrap();

        board.move_piece(sq("g1"), sq("f3"));

        assert!(board.get(sq("g1")).is_none());
        let moved = board.get(sq("f3")).unwrap();
        assert_eq!(moved.id(), knight.id());
        assert!(moved.has_moved());
    }

    #[test]
    fn test_move_from_empty_square_is_noop() {
        let mut board = Board::new();
        let before = board.clone();
        board.move_piece(sq("e4"), sq("e5"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_malformed_labels() {
        let mut board = Board::new();
        assert!(board.get_label("z9").is_none());
        assert!(board.set_label("e", None).is_err());
        assert!(board.move_piece_label("e2", "e44").is_err());
    }

    #[test]
    fn test_from_placement() {
        let board = Board::from_placement("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1").unwrap();
        assert_eq!(board.pieces().count(), 6);
        assert_eq!(board.find_king(Color::Black), Some(sq("g8")));
        assert_eq!(board.get_label("a1").unwrap().kind(), PieceKind::Rook);
        assert_eq!(board.get_label("a1").unwrap().color(), Color::Black);

        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7x/8/8/8/8/8/8/8").is_err());

        // Long digit runs and zero counts are rejected rather than overflowing
        let long_rank = format!("{}/8/8/8/8/8/8/8", "9".repeat(30));
        assert!(Board::from_placement(&long_rank).is_err());
        assert!(Board::from_placement("44444444/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("0rnbqkbnr/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("rnbqkbnr0/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::new();
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
