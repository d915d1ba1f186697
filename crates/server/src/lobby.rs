//! Lobby: names connections and pairs them into rooms in arrival order

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::player::{Outbox, Player};
use crate::room::{Room, RoomSnapshot};

pub struct Lobby {
    waiting: Mutex<VecDeque<Arc<Player>>>,
    rooms: Mutex<Vec<Arc<Room>>>,
    next_user: AtomicU64,
    next_room: AtomicU64,
    validate_moves: bool,
}

impl Lobby {
    pub fn new(validate_moves: bool) -> Self {
        Self {
            waiting: Mutex::new(VecDeque::new()),
            rooms: Mutex::new(Vec::new()),
            next_user: AtomicU64::new(1),
            next_room: AtomicU64::new(1),
            validate_moves,
        }
    }

    /// Registers a new connection as `USER<n>`.
    pub fn connect(&self, outbox: Outbox) -> Arc<Player> {
        let n = self.next_user.fetch_add(1, Ordering::Relaxed);
        Arc::new(Player::new(format!("USER{}", n), outbox))
    }

    /// Queues the player; the first two waiting become white and black of a new room.
    pub fn join(&self, player: Arc<Player>) -> Option<Arc<Room>> {
        let mut waiting = self.waiting.lock().unwrap();
        waiting.push_back(player.clone());
        info!(player = %player.name(), total = waiting.len(), "joined the lobby");

        if waiting.len() < 2 {
            return None;
        }
        let white = waiting.pop_front()?;
        let black = waiting.pop_front()?;

        let id = self.next_room.fetch_add(1, Ordering::Relaxed);
        let room = Arc::new(Room::new(id, white.clone(), black.clone(), self.validate_moves));
        white.set_room(Some(room.clone()));
        black.set_room(Some(room.clone()));
        self.rooms.lock().unwrap().push(room.clone());

        room.start();
        Some(room)
    }

    /// Removes a disconnected player from the lobby or its room.
    pub fn leave(&self, player: &Arc<Player>) {
        self.waiting
            .lock()
            .unwrap()
            .retain(|waiting| !Arc::ptr_eq(waiting, player));

        if let Some(room) = player.room() {
            room.notify_opponent_left(player);
            player.set_room(None);
            self.rooms.lock().unwrap().retain(|r| !Arc::ptr_eq(r, &room));
        }
        info!(player = %player.name(), "has disconnected");
    }

    pub fn waiting(&self) -> usize {
        self.waiting.lock().unwrap().len()
    }

    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        self.rooms.lock().unwrap().iter().map(|room| room.snapshot()).collect()
    }
}
