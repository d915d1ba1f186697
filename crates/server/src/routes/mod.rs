use axum::{extract::State, Json};
use std::sync::Arc;

use crate::room::RoomSnapshot;
use crate::AppState;

pub mod play;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSnapshot>> {
    Json(state.lobby.snapshots())
}
