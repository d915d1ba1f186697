//! Line-based wire protocol shared by clients and the session server
//!
//! One message per line, space separated:
//!
//! - client to server: `READY`, `MOVE <from> <to> [CASTLE <rook_from> <rook_to>]`, `EXIT`
//! - server to client: `START <color>`, `TURN <color>`, relayed `MOVE ...`,
//!   `OPPONENT_LEFT`, `REJECTED <from> <to>`
//!
//! Promotion is never sent; both peers recompute it after applying a move.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::square::Square;

/// A committed move as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub from: Square,
    pub to: Square,
    /// Rook relocation, present only for castling.
    pub castle: Option<(Square, Square)>,
}

impl MoveCommand {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            castle: None,
        }
    }

    pub fn with_castle(mut self, rook_from: Square, rook_to: Square) -> Self {
        self.castle = Some((rook_from, rook_to));
        self
    }

    /// Parses the fields following the `MOVE` keyword.
    fn from_fields(fields: &[&str]) -> Result<Self> {
        match fields {
            [from, to] => Ok(Self::new(from.parse()?, to.parse()?)),
            [from, to, "CASTLE", rook_from, rook_to] => {
                Ok(Self::new(from.parse()?, to.parse()?).with_castle(rook_from.parse()?, rook_to.parse()?))
            }
            _ => Err(Error::Protocol(format!("malformed MOVE: {}", fields.join(" ")))),
        }
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MOVE {} {}", self.from, self.to)?;
        if let Some((rook_from, rook_to)) = self.castle {
            write!(f, " CASTLE {} {}", rook_from, rook_to)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessage {
    Ready,
    Move(MoveCommand),
    Exit,
}

impl FromStr for ClientMessage {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["READY"] => Ok(ClientMessage::Ready),
            ["EXIT"] => Ok(ClientMessage::Exit),
            ["MOVE", rest @ ..] => MoveCommand::from_fields(rest).map(ClientMessage::Move),
            _ => Err(Error::Protocol(format!("unknown client message: {:?}", line))),
        }
    }
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientMessage::Ready => f.write_str("READY"),
            ClientMessage::Move(cmd) => write!(f, "{}", cmd),
            ClientMessage::Exit => f.write_str("EXIT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// Game assigned; carries the recipient's color.
    Start(Color),
    Turn(Color),
    Move(MoveCommand),
    OpponentLeft,
    Rejected { from: Square, to: Square },
}

impl FromStr for ServerMessage {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["START", color] => Ok(ServerMessage::Start(color.parse()?)),
            ["TURN", color] => Ok(ServerMessage::Turn(color.parse()?)),
            ["OPPONENT_LEFT"] => Ok(ServerMessage::OpponentLeft),
            ["REJECTED", from, to] => Ok(ServerMessage::Rejected {
                from: from.parse()?,
                to: to.parse()?,
            }),
            ["MOVE", rest @ ..] => MoveCommand::from_fields(rest).map(ServerMessage::Move),
            _ => Err(Error::Protocol(format!("unknown server message: {:?}", line))),
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::Start(color) => write!(f, "START {}", color),
            ServerMessage::Turn(color) => write!(f, "TURN {}", color),
            ServerMessage::Move(cmd) => write!(f, "{}", cmd),
            ServerMessage::OpponentLeft => f.write_str("OPPONENT_LEFT"),
            ServerMessage::Rejected { from, to } => write!(f, "REJECTED {} {}", from, to),
        }
    }
}
