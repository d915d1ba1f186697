//! A connected client as seen by the lobby and its room

use std::sync::{Arc, Mutex};

use chess_duel_core::ServerMessage;
use tokio::sync::mpsc;
use tracing::debug;

use crate::room::Room;

/// Messages queued here are written to the client's socket by its writer task.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

pub struct Player {
    name: String,
    outbox: Outbox,
    room: Mutex<Option<Arc<Room>>>,
}

impl Player {
    pub fn new(name: String, outbox: Outbox) -> Self {
        Self {
            name,
            outbox,
            room: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues a message; a closed connection silently drops it.
    pub fn send(&self, msg: ServerMessage) {
        if self.outbox.send(msg).is_err() {
            debug!(player = %self.name, %msg, "connection closed, message dropped");
        }
    }

    pub fn room(&self) -> Option<Arc<Room>> {
        self.room.lock().unwrap().clone()
    }

    pub fn set_room(&self, room: Option<Arc<Room>>) {
        *self.room.lock().unwrap() = room;
    }
}
