//! A game room: two paired players, the ready handshake and move relay
//!
//! With validation on, the room keeps the authoritative game. Checking and
//! committing a move happen under the same lock as the relay, so two moves
//! can never interleave on the board.

use std::sync::{Arc, Mutex};

use chess_duel_core::{Color, Game, GameStatus, MoveCommand, ServerMessage};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::player::Player;

/// Point-in-time view of a room for the `/rooms` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSnapshot {
    pub id: u64,
    pub white: String,
    pub black: String,
    pub moves: usize,
    /// Only known when the room validates moves.
    pub turn: Option<Color>,
    pub status: Option<GameStatus>,
}

pub struct Room {
    id: u64,
    white: Arc<Player>,
    black: Arc<Player>,
    state: Mutex<RoomState>,
}

#[derive(Default)]
struct RoomState {
    white_ready: bool,
    black_ready: bool,
    left_notified: bool,
    relayed: usize,
    game: Option<Game>,
}

impl Room {
    pub fn new(id: u64, white: Arc<Player>, black: Arc<Player>, validate_moves: bool) -> Self {
        let state = RoomState {
            game: validate_moves.then(Game::new),
            ..RoomState::default()
        };
        Self {
            id,
            white,
            black,
            state: Mutex::new(state),
        }
    }

    pub fn color_of(&self, player: &Arc<Player>) -> Option<Color> {
        if Arc::ptr_eq(player, &self.white) {
            Some(Color::White)
        } else if Arc::ptr_eq(player, &self.black) {
            Some(Color::Black)
        } else {
            None
        }
    }

    fn player(&self, color: Color) -> &Arc<Player> {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Tells each player which side they play.
    pub fn start(&self) {
        self.white.send(ServerMessage::Start(Color::White));
        self.black.send(ServerMessage::Start(Color::Black));
        info!(
            room = self.id,
            white = %self.white.name(),
            black = %self.black.name(),
            "game started"
        );
    }

    /// Once both players are ready, both are told white moves and the
    /// validated game follows suit.
    pub fn set_ready(&self, player: &Arc<Player>) {
        let Some(color) = self.color_of(player) else {
            return;
        };
        let mut state = self.state.lock().unwrap();
        match color {
            Color::White => state.white_ready = true,
            Color::Black => state.black_ready = true,
        }
        info!(room = self.id, player = %player.name(), "is READY");

        if state.white_ready && state.black_ready {
            if let Some(game) = state.game.as_mut() {
                game.set_turn(Color::White);
            }
            self.white.send(ServerMessage::Turn(Color::White));
            self.black.send(ServerMessage::Turn(Color::White));
            state.white_ready = false;
            state.black_ready = false;
        }
    }

    /// Relays a move to the sender's opponent, after committing it when validating.
    pub fn forward_move(&self, sender: &Arc<Player>, cmd: MoveCommand) {
        let Some(color) = self.color_of(sender) else {
            return;
        };
        let mut state = self.state.lock().unwrap();

        if let Some(game) = state.game.as_mut() {
            match game.play_as(color, &cmd) {
                Ok(committed) => {
                    debug!(room = self.id, record = %committed.record, "committed");
                    let status = game.status();
                    if status.is_over() {
                        info!(room = self.id, %status, side = %game.turn(), "game over");
                    }
                }
                Err(e) => {
                    warn!(room = self.id, player = %sender.name(), %cmd, error = %e, "rejected move");
                    sender.send(ServerMessage::Rejected {
                        from: cmd.from,
                        to: cmd.to,
                    });
                    return;
                }
            }
        }

        state.relayed += 1;
        info!(room = self.id, player = %sender.name(), %cmd, "relaying move");
        self.player(color.opposite()).send(ServerMessage::Move(cmd));
    }

    /// Tells the remaining player their opponent is gone. Only the first call notifies.
    pub fn notify_opponent_left(&self, leaver: &Arc<Player>) {
        let Some(color) = self.color_of(leaver) else {
            return;
        };
        let mut state = self.state.lock().unwrap();
        if state.left_notified {
            return;
        }
        state.left_notified = true;

        let remaining = self.player(color.opposite());
        info!(
            room = self.id,
            leaver = %leaver.name(),
            remaining = %remaining.name(),
            "opponent disconnected"
        );
        remaining.send(ServerMessage::OpponentLeft);
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let state = self.state.lock().unwrap();
        RoomSnapshot {
            id: self.id,
            white: self.white.name().to_string(),
            black: self.black.name().to_string(),
            moves: state.relayed,
            turn: state.game.as_ref().map(Game::turn),
            status: state.game.as_ref().map(Game::status),
        }
    }
}
