//! Game session management.
//!
//! One session holds one [`GameStateMachine`]. All operations on a session
//! run under the manager's lock, so each session has a single writer.

use derive_more::Display;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use timetravel_core::GameStateMachine;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Error from the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// No session with this id.
    #[display("Session {_0} not found")]
    NotFound(SessionId),
    /// A session with this id already exists.
    #[display("Session {_0} already exists")]
    AlreadyExists(SessionId),
}

impl std::error::Error for SessionError {}

/// A game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game.
    pub game: GameStateMachine,
}

impl GameSession {
    /// Creates a session at the start position.
    #[instrument]
    pub fn new(id: SessionId) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            game: GameStateMachine::new(),
        }
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        // A poisoned lock still guards consistent sessions.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a session, generating an id when none is given.
    #[instrument(skip(self))]
    pub fn create_session(&self, id: Option<SessionId>) -> Result<GameSession, SessionError> {
        let mut sessions = self.lock();

        let id = match id {
            Some(id) => id,
            None => loop {
                let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let candidate = format!("game-{}", n);
                if !sessions.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }

        let session = GameSession::new(id.clone());
        sessions.insert(id.clone(), session.clone());
        info!(session_id = %id, "Created new session");
        Ok(session)
    }

    /// Gets a copy of a session.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Result<GameSession, SessionError> {
        let sessions = self.lock();
        sessions.get(id).cloned().ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound(id.to_string())
        })
    }

    /// Runs `f` on a session's game while holding the lock.
    #[instrument(skip(self, f))]
    pub fn with_game<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameStateMachine) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let result = f(&mut session.game);
        debug!(session_id = id, step = session.game.current_step(), "Session updated");
        Ok(result)
    }

    /// Removes a session.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock();
        match sessions.remove(id) {
            Some(_) => {
                info!(session_id = id, "Removed session");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    /// Lists all session ids, sorted.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let sessions = self.lock();
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}
