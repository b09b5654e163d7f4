//! Tests for the session REST API, driven in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use timetravel_server::{SessionManager, router};
use tower::ServiceExt;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn new_game(app: &Router, id: &str) {
    let (status, _) = call(app, Method::POST, "/sessions", Some(json!({ "session_id": id }))).await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn play(app: &Router, id: &str, cell: usize) -> (StatusCode, Value) {
    call(
        app,
        Method::POST,
        &format!("/sessions/{}/moves", id),
        Some(json!({ "cell": cell })),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let app = router(SessionManager::new());
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_create_without_body_generates_id() {
    let app = router(SessionManager::new());
    let (status, body) = call(&app, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["session_id"], "game-1");
    assert_eq!(body["current_step"], 0);
    assert_eq!(body["message"], "Next player: X");

    let (_, list) = call(&app, Method::GET, "/sessions", None).await;
    assert_eq!(list, json!(["game-1"]));
}

#[tokio::test]
async fn test_duplicate_session_conflicts() {
    let app = router(SessionManager::new());
    new_game(&app, "dup").await;
    let (status, body) = call(&app, Method::POST, "/sessions", Some(json!({ "session_id": "dup" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "session_exists");
}

#[tokio::test]
async fn test_winning_game() {
    let app = router(SessionManager::new());
    new_game(&app, "win").await;
    for cell in [0, 4, 1, 7] {
        let (status, _) = play(&app, "win", cell).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = play(&app, "win", 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["kind"], "winner");
    assert_eq!(body["status"]["player"], "X");
    assert_eq!(body["winning_cells"], json!([0, 1, 2]));

    let (status, body) = play(&app, "win", 8).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "game_already_decided");
}

#[tokio::test]
async fn test_rejections_map_to_status_codes() {
    let app = router(SessionManager::new());
    new_game(&app, "r").await;
    play(&app, "r", 4).await;

    let (status, body) = play(&app, "r", 4).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "cell_occupied");

    let (status, body) = play(&app, "r", 9).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_index");

    let (status, body) = play(&app, "missing", 0).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let (_, body) = call(&app, Method::GET, "/sessions/r", None).await;
    assert_eq!(body["history_len"], 2);
}

#[tokio::test]
async fn test_jump_then_move_truncates_history() {
    let app = router(SessionManager::new());
    new_game(&app, "tt").await;
    for cell in [0, 4, 1, 7] {
        play(&app, "tt", cell).await;
    }

    let (status, body) = call(&app, Method::POST, "/sessions/tt/jump", Some(json!({ "step": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], 1);
    assert_eq!(body["next_player"], "O");
    assert_eq!(body["history_len"], 5);

    let (_, body) = play(&app, "tt", 8).await;
    assert_eq!(body["history_len"], 3);
    assert_eq!(body["current_step"], 2);

    let (status, body) = call(&app, Method::POST, "/sessions/tt/jump", Some(json!({ "step": 4 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_index");
}

#[tokio::test]
async fn test_sort_toggle_reverses_history() {
    let app = router(SessionManager::new());
    new_game(&app, "s").await;
    play(&app, "s", 4).await;

    let (status, body) = call(&app, Method::POST, "/sessions/s/sort", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_order"], "descending");
    assert_eq!(body["history"][0]["step"], 1);
    assert_eq!(body["history"][1]["step"], 0);

    let (_, body) = call(&app, Method::POST, "/sessions/s/sort", None).await;
    assert_eq!(body["display_order"], "ascending");
    assert_eq!(body["current_step"], 1);
}

#[tokio::test]
async fn test_delete_session() {
    let app = router(SessionManager::new());
    new_game(&app, "d").await;
    let (status, _) = call(&app, Method::DELETE, "/sessions/d", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::GET, "/sessions/d", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
