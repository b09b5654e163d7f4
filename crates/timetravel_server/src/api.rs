//! JSON REST API over game sessions.

use crate::session::{SessionError, SessionId, SessionManager};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use timetravel_core::{GameError, GameSnapshot, GameStateMachine};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Request for creating a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateSessionRequest {
    /// Session ID to use; generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Request for making a move.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MoveRequest {
    /// Cell on the board (0-8, where 0=top-left, 8=bottom-right).
    pub cell: usize,
}

/// Request for jumping through history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JumpRequest {
    /// History step to show (0 = game start).
    pub step: usize,
}

/// Session id plus the game's read model.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Session ID.
    pub session_id: SessionId,
    /// Game state.
    #[serde(flatten)]
    pub game: GameSnapshot,
}

impl SessionView {
    fn new(session_id: impl Into<SessionId>, game: &GameStateMachine) -> Self {
        Self {
            session_id: session_id.into(),
            game: game.snapshot(),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Failure of an API call.
#[derive(Debug, Clone, Display, From)]
pub enum ApiError {
    /// Session lookup or creation failed.
    Session(SessionError),
    /// The game rejected the operation.
    Game(GameError),
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Game(GameError::InvalidIndex { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Game(GameError::CellOccupied(_) | GameError::GameAlreadyDecided(_)) => {
                StatusCode::CONFLICT
            }
            ApiError::Game(GameError::InvariantViolation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => "session_not_found",
            ApiError::Session(SessionError::AlreadyExists(_)) => "session_exists",
            ApiError::Game(e) => e.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = %status, error = %self, "Request rejected");
        let body = ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router with shared sessions.
#[instrument(skip(sessions))]
pub fn router(sessions: SessionManager) -> Router {
    info!("Building session API router");
    Router::new()
        .route("/health", get(health))
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/moves", post(make_move))
        .route("/sessions/{id}/jump", post(jump))
        .route("/sessions/{id}/sort", post(toggle_sort))
        .layer(ServiceBuilder::new().map_request(|req: Request<axum::body::Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(sessions)
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(sessions))]
async fn list_sessions(State(sessions): State<SessionManager>) -> Json<Vec<SessionId>> {
    Json(sessions.list_sessions())
}

#[instrument(skip(sessions, req))]
async fn create_session(
    State(sessions): State<SessionManager>,
    req: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let session = sessions.create_session(req.session_id)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::new(session.id, &session.game)),
    ))
}

#[instrument(skip(sessions))]
async fn get_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, ApiError> {
    let session = sessions.get_session(&id)?;
    Ok(Json(SessionView::new(session.id, &session.game)))
}

#[instrument(skip(sessions))]
async fn delete_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    sessions.remove_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(sessions, req), fields(cell = req.cell))]
async fn make_move(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = sessions.with_game(&id, |game| {
        let placement = game.apply_move(req.cell)?;
        debug!(step = placement.step(), player = %placement.player(), "Move accepted");
        Ok::<_, GameError>(SessionView::new(id.as_str(), game))
    })??;
    Ok(Json(view))
}

#[instrument(skip(sessions, req), fields(step = req.step))]
async fn jump(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = sessions.with_game(&id, |game| {
        game.jump_to(req.step)?;
        Ok::<_, GameError>(SessionView::new(id.as_str(), game))
    })??;
    Ok(Json(view))
}

#[instrument(skip(sessions))]
async fn toggle_sort(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, ApiError> {
    let view = sessions.with_game(&id, |game| {
        game.toggle_sort_order();
        SessionView::new(id.as_str(), game)
    })?;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(SessionError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(GameError::CellOccupied(timetravel_core::Position::Center)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(GameError::InvalidIndex {
                target: timetravel_core::IndexTarget::Cell,
                index: 9,
                limit: 9,
            })
            .code(),
            "invalid_index"
        );
    }

    #[test]
    fn test_move_request_schema() {
        let schema = schemars::schema_for!(MoveRequest);
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json["properties"]["cell"].is_object());
    }
}
