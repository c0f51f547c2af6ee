//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use checkers_core::{Rejection, Side};
use serde_json::json;

/// Failure of an API request, rendered as `{ "error": ... }`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("game {0} not found")]
    NotFound(u64),
    #[error("game {0} is full")]
    GameFull(u64),
    #[error("game {0} is over")]
    GameOver(u64),
    #[error("it is not {0}'s turn")]
    NotYourTurn(Side),
    #[error("selected square does not hold a {0} piece")]
    NotYourPiece(Side),
    #[error("black is played by the AI")]
    AiControlled,
    #[error("illegal move: {0}")]
    IllegalMove(#[from] Rejection),
    #[error("AI task failed: {0}")]
    AiTask(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::GameFull(_) | ApiError::GameOver(_) => StatusCode::CONFLICT,
            ApiError::NotYourTurn(_) | ApiError::NotYourPiece(_) | ApiError::AiControlled => {
                StatusCode::FORBIDDEN
            }
            ApiError::IllegalMove(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AiTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
