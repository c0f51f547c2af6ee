//! Lobby and game API endpoints
//!
//! Human moves are validated by the core; when an AI game passes the turn to
//! black, the AI reply is searched on a blocking thread and applied before
//! the response is sent.

use axum::{
    extract::{Path, State},
    Json,
};
use checkers_core::{Move, Position, Side};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::{GameSummary, GameView, ServerState};

#[derive(Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    #[serde(default)]
    pub ai_opponent: bool,
}

#[derive(Serialize)]
pub struct SeatResponse {
    pub id: u64,
    pub color: Side,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub color: Side,
    pub selected: Position,
    pub destination: Position,
}

#[derive(Serialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub player_move: Move,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_move: Option<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_error: Option<String>,
    pub game: GameView,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct LeaveResponse {
    pub removed: bool,
}

/// List games in the lobby
pub async fn list_games(State(state): State<Arc<ServerState>>) -> Json<Vec<GameSummary>> {
    Json(state.games().values().map(|s| s.summary()).collect())
}

/// Create a game; the creator plays red
pub async fn create_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateGameRequest>,
) -> Json<SeatResponse> {
    let id = state.create_game(req.name, req.ai_opponent);
    Json(SeatResponse {
        id,
        color: Side::Red,
    })
}

/// Join an existing game
pub async fn join_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SeatResponse>, ApiError> {
    let mut games = state.games_mut();
    let session = games.get_mut(&id).ok_or(ApiError::NotFound(id))?;
    let color = session.join()?;
    tracing::info!(game = id, %color, "player joined");
    Ok(Json(SeatResponse { id, color }))
}

/// Get full game state
pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameView>, ApiError> {
    let games = state.games();
    let session = games.get(&id).ok_or(ApiError::NotFound(id))?;
    Ok(Json(session.view()))
}

/// Apply a player's move, then the AI reply if it is the AI's turn
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let (player_move, pending) = {
        let mut games = state.games_mut();
        let session = games.get_mut(&id).ok_or(ApiError::NotFound(id))?;
        let mv = session.apply_player_move(req.color, req.selected, req.destination)?;
        (mv, session.take_ai_turn())
    };

    let ai_outcome = match pending {
        Some((board, mut ai)) => {
            let task = tokio::task::spawn_blocking(move || {
                let decision = ai.select_move(&board);
                (ai, decision)
            });
            match task.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    state.recover_ai(id);
                    return Err(ApiError::AiTask(e.to_string()));
                }
            }
        }
        None => None,
    };

    let mut games = state.games_mut();
    let session = games.get_mut(&id).ok_or(ApiError::NotFound(id))?;

    let (ai_move, ai_error) = match ai_outcome {
        Some((ai, decision)) => match session.finish_ai_turn(ai, decision) {
            Ok(mv) => (Some(mv), None),
            Err(e) => (None, Some(e.to_string())),
        },
        None => (None, None),
    };

    Ok(Json(MoveResponse {
        player_move,
        ai_move,
        ai_error,
        game: session.view(),
    }))
}

/// Append a chat message
pub async fn post_chat(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut games = state.games_mut();
    let session = games.get_mut(&id).ok_or(ApiError::NotFound(id))?;
    session.chat.push(req.message);
    Ok(Json(session.chat.clone()))
}

/// Leave a game. Multiplayer games are removed, AI games are kept.
pub async fn leave_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<LeaveResponse>, ApiError> {
    let removed = state.end_game(id)?;
    Ok(Json(LeaveResponse { removed }))
}
