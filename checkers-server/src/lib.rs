//! Checkers Server - HTTP API for the lobby and live boards
//!
//! This crate provides the web backend:
//! - Lobby: create, list, join and leave games
//! - Live board: player moves validated by checkers-core
//! - AI opponent replies for single-player games
//! - Per-game chat log
//! - Static file serving for the client

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use checkers_core::EngineConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::{GameSession, GameSummary, GameView, Player, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "client/build".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Lobby
        .route(
            "/api/games",
            get(routes::games::list_games).post(routes::games::create_game),
        )
        .route(
            "/api/games/:id",
            get(routes::games::get_game).delete(routes::games::leave_game),
        )
        .route("/api/games/:id/join", post(routes::games::join_game))
        // Live board
        .route("/api/games/:id/move", post(routes::games::make_move))
        .route("/api/games/:id/chat", post(routes::games::post_chat))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.engine.clone()));
    let router = create_router(&config, state);

    tracing::info!("Checkers server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    tracing::info!("AI search depth: {}", config.engine.depth);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
