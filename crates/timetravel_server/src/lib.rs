//! Session server for time-travel tic-tac-toe.
//!
//! Each session owns one game; the REST API in [`api`] exposes moves,
//! history jumps and the history order toggle as JSON endpoints.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod session;

pub use api::{
    ApiError, CreateSessionRequest, ErrorBody, JumpRequest, MoveRequest, SessionView, router,
};
pub use session::{GameSession, SessionError, SessionId, SessionManager};

use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Serves the API on an already bound listener until the server stops.
#[instrument(skip(listener, sessions))]
pub async fn serve(listener: TcpListener, sessions: SessionManager) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Session server ready");
    axum::serve(listener, router(sessions)).await
}
