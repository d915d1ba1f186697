//! `GET /play`: one WebSocket per player, one protocol line per text frame

use std::ops::ControlFlow;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use chess_duel_core::{ClientMessage, ServerMessage};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::player::Player;
use crate::AppState;

pub async fn connect(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| session(socket, state))
}

async fn session(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();
    let player = state.lobby.connect(outbox);
    info!(player = %player.name(), "connected");

    let writer = tokio::spawn(async move {
        while let Some(msg) = inbox.recv().await {
            if sink.send(Message::Text(msg.to_string())).await.is_err() {
                break;
            }
        }
    });

    state.lobby.join(player.clone());

    'frames: while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                info!(player = %player.name(), error = %e, "connection error");
                break;
            }
        };
        for line in text.lines() {
            if handle_line(&player, line).is_break() {
                break 'frames;
            }
        }
    }

    state.lobby.leave(&player);
    writer.abort();
}

/// Dispatches one client line. Breaks when the client asked to leave.
fn handle_line(player: &Arc<Player>, line: &str) -> ControlFlow<()> {
    let line = line.trim();
    if line.is_empty() {
        return ControlFlow::Continue(());
    }
    info!(player = %player.name(), %line, "says");

    match line.parse::<ClientMessage>() {
        Ok(ClientMessage::Ready) => {
            if let Some(room) = player.room() {
                room.set_ready(player);
            }
        }
        Ok(ClientMessage::Move(cmd)) => {
            if let Some(room) = player.room() {
                room.forward_move(player, cmd);
            }
        }
        Ok(ClientMessage::Exit) => return ControlFlow::Break(()),
        Err(e) => warn!(player = %player.name(), error = %e, "ignoring message"),
    }
    ControlFlow::Continue(())
}
