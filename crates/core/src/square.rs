//! Board coordinates and algebraic labels
//!
//! A square is stored as a (row, column) pair. Row 0 is rank 8 (black's
//! back rank) and row 7 is rank 1 (white's back rank), so the label is a
//! pure function of the pair and never needs to be stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A square on the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Returns the square at `(row, col)`, or `None` when either is outside 0..8.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Callers guarantee `row < 8 && col < 8`.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// File letter, 'a'..='h'.
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number, 1..=8.
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Algebraic label such as "e4".
    pub fn label(self) -> String {
        to_label(self.row, self.col)
    }

    /// Square displaced by a signed row/column delta, if still on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order, a8 first and h1 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Self::at(i / 8, i % 8))
    }
}

/// Converts a (row, column) pair to its algebraic label.
pub fn to_label(row: u8, col: u8) -> String {
    let file = (b'a' + col) as char;
    let rank = 8 - row;
    format!("{}{}", file, rank)
}

/// Converts an algebraic label back to its (row, column) pair.
pub fn from_label(label: &str) -> Result<(u8, u8)> {
    let square: Square = label.parse()?;
    Ok((square.row, square.col))
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        Ok(Self::at(b'8' - rank, file - b'a'))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
