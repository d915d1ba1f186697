//! Chess Duel Core Library
//!
//! Board state, piece movement and the rule engine behind a two-player
//! game, plus the line protocol the two players exchange.

pub mod board;
pub mod color;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod protocol;
pub mod rules;
pub mod square;

pub use board::Board;
pub use color::Color;
pub use error::{Error, Result};
pub use game::{CommittedMove, Game};
pub use moves::Move;
pub use piece::{Piece, PieceId, PieceKind};
pub use protocol::{ClientMessage, MoveCommand, ServerMessage};
pub use rules::{GameStatus, RuleEngine};
pub use square::Square;
