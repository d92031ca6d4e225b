//! Process-lifetime chat session storage
//!
//! Sessions are held in a mutex-guarded map shared across request handlers.
//! Creation is atomic under the lock: a request carrying an unknown or
//! absent session id mints a fresh one. Sessions are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::error::Error as CrateError;

/// Error type for session store operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session map lock was poisoned by a panicking holder
    #[error("session store lock poisoned")]
    Poisoned,
}

impl From<SessionError> for CrateError {
    fn from(err: SessionError) -> Self {
        CrateError::Session(err.to_string())
    }
}

/// One exchange in a chat session
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// What the user asked
    pub user: String,

    /// What the bot answered
    pub assistant: String,

    /// When the exchange happened
    pub timestamp: DateTime<Utc>,
}

/// A chat session's history
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// Exchanges in order
    pub messages: Vec<ChatMessage>,
}

/// Shared, mutex-guarded map from session id to history
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, ChatSession>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a client-supplied session id.
    ///
    /// An id that names an existing session is returned unchanged; an
    /// absent or unknown id creates a fresh session under a new uuid,
    /// atomically under the map lock.
    pub fn ensure(&self, id: Option<&str>) -> Result<String, SessionError> {
        let mut sessions = self.inner.lock().map_err(|_| SessionError::Poisoned)?;

        if let Some(id) = id {
            if sessions.contains_key(id) {
                return Ok(id.to_string());
            }
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            ChatSession {
                created_at: Utc::now(),
                messages: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Append one exchange to a session, creating the session if needed
    pub fn append(&self, id: &str, user: &str, assistant: &str) -> Result<(), SessionError> {
        let mut sessions = self.inner.lock().map_err(|_| SessionError::Poisoned)?;

        let session = sessions.entry(id.to_string()).or_insert_with(|| ChatSession {
            created_at: Utc::now(),
            messages: Vec::new(),
        });
        session.messages.push(ChatMessage {
            user: user.to_string(),
            assistant: assistant.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Snapshot of a session's history, if it exists
    pub fn history(&self, id: &str) -> Result<Option<ChatSession>, SessionError> {
        let sessions = self.inner.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.get(id).cloned())
    }

    /// Number of live sessions
    pub fn len(&self) -> Result<usize, SessionError> {
        let sessions = self.inner.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.len())
    }

    /// Whether the store has no sessions
    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }
}
