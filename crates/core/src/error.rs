//! Error types for chess-duel-core
//!
//! The rule engine itself answers with plain booleans; these errors only
//! surface at the edges (parsing labels and messages, committing moves).

use thiserror::Error;

use crate::color::Color;
use crate::square::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Invalid FEN placement: {0}")]
    InvalidFen(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("Wrong turn: {expected} to move, got a move from {got}")]
    WrongTurn { expected: Color, got: Color },

    #[error("Game is over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, Error>;
