//! Move records for history and display

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::square::Square;

/// A completed move. Carries no validation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square, moved: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            moved,
            captured,
        }
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn moved_piece(&self) -> &Piece {
        &self.moved
    }

    pub fn captured_piece(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.moved.kind().as_str(), self.from, self.to)?;
        if let Some(captured) = &self.captured {
            write!(f, " captures {}", captured.kind().as_str())?;
        }
        Ok(())
    }
}
