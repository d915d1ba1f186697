use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod lobby;
mod player;
mod room;
mod routes;

use config::Config;
use lobby::Lobby;

pub struct AppState {
    pub lobby: Lobby,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!(bind = %config.bind, validate_moves = config.validate_moves, "configuration loaded");

    let state = Arc::new(AppState {
        lobby: Lobby::new(config.validate_moves),
    });

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/rooms", get(routes::rooms))
        .route("/play", get(routes::play::connect))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("Failed to bind listener");

    info!("Server running at {}", config.bind);

    axum::serve(listener, app).await.expect("Server error");
}
