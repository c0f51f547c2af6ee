//! Integration tests for checkers-server API

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use checkers_core::EngineConfig;
use checkers_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig {
        engine: EngineConfig {
            depth: 2,
            seed: Some(7),
            ..EngineConfig::default()
        },
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::new(config.engine.clone()));
    create_router(&config, state)
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn move_body(color: &str, from: (i8, i8), to: (i8, i8)) -> Value {
    json!({
        "color": color,
        "selected": {"row": from.0, "col": from.1},
        "destination": {"row": to.0, "col": to.1},
    })
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let (status, json) = send(&app, Method::GET, "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["games"], 0);
    assert_eq!(json["ai_depth"], 2);
}

#[tokio::test]
async fn test_create_and_list_games() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/games",
        Some(json!({"name": "friendly"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 0);
    assert_eq!(created["color"], "red");

    let (_, list) = send(&app, Method::GET, "/api/games", None).await;
    let games = list.as_array().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["name"], "friendly");
    assert_eq!(games[0]["number_of_players"], 1);
    assert_eq!(games[0]["ai_opponent"], false);
    assert_eq!(games[0]["result"], "Ongoing");
}

#[tokio::test]
async fn test_game_view_uses_wire_board() {
    let app = test_app();
    send(&app, Method::POST, "/api/games", Some(json!({"name": "g"}))).await;

    let (status, view) = send(&app, Method::GET, "/api/games/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["turn"], "red");
    assert_eq!(view["board"][0], json!([1, 0, 1, 0, 1, 0, 1, 0]));
    assert_eq!(view["board"][7], json!([0, 2, 0, 2, 0, 2, 0, 2]));
}

#[tokio::test]
async fn test_unknown_game_is_404() {
    let app = test_app();
    let (status, json) = send(&app, Method::GET, "/api/games/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn test_multiplayer_flow() {
    let app = test_app();
    send(&app, Method::POST, "/api/games", Some(json!({"name": "pvp"}))).await;

    let (status, seat) = send(&app, Method::POST, "/api/games/0/join", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seat["color"], "black");

    let (status, _) = send(&app, Method::POST, "/api/games/0/join", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Black cannot move first
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/games/0/move",
        Some(move_body("black", (5, 1), (4, 0))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, moved) = send(
        &app,
        Method::POST,
        "/api/games/0/move",
        Some(move_body("red", (2, 2), (3, 3))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["game"]["turn"], "black");
    assert!(moved.get("ai_move").is_none());
    assert_eq!(moved["game"]["board"][3][3], 1);
}

#[tokio::test]
async fn test_illegal_move_rejected() {
    let app = test_app();
    send(&app, Method::POST, "/api/games", Some(json!({"name": "pvp"}))).await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/games/0/move",
        Some(move_body("red", (2, 2), (4, 4))),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().starts_with("illegal move"));

    let (_, view) = send(&app, Method::GET, "/api/games/0", None).await;
    assert_eq!(view["turn"], "red");
}

#[tokio::test]
async fn test_ai_replies_to_move() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/games",
        Some(json!({"name": "vs ai", "ai_opponent": true})),
    )
    .await;
    assert_eq!(created["color"], "red");

    let (status, moved) = send(
        &app,
        Method::POST,
        "/api/games/0/move",
        Some(move_body("red", (2, 2), (3, 3))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["game"]["turn"], "red");

    let ai_from = &moved["ai_move"]["from"];
    let row = ai_from["row"].as_i64().unwrap();
    assert!(row >= 5, "AI should move a black piece, got row {}", row);

    // The human cannot play black in an AI game
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/games/0/move",
        Some(move_body("black", (5, 1), (4, 0))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_chat_and_leave() {
    let app = test_app();
    send(&app, Method::POST, "/api/games", Some(json!({"name": "pvp"}))).await;
    send(&app, Method::POST, "/api/games", Some(json!({"name": "ai", "ai_opponent": true}))).await;

    let (status, chat) = send(
        &app,
        Method::POST,
        "/api/games/0/chat",
        Some(json!({"message": "good luck"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chat, json!(["good luck"]));

    let (_, left) = send(&app, Method::DELETE, "/api/games/0", None).await;
    assert_eq!(left["removed"], true);
    let (_, left) = send(&app, Method::DELETE, "/api/games/1", None).await;
    assert_eq!(left["removed"], false);

    let (_, list) = send(&app, Method::GET, "/api/games", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
