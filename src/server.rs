//! HTTP chat service over the loaded corpus
//!
//! Exposes `POST /api/chat` and `GET /api/status`. The corpus is read-only
//! once loaded; the session store is the only shared mutable state.
//! Handler-path failures are logged and surfaced as generic 500s, never a
//! crash of the serving process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::bot::{DocBot, SessionError, SessionStore, SourceRef};
use crate::error::Result;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The chat bot, read-only after load
    pub bot: Arc<DocBot>,

    /// Session histories, shared across requests
    pub sessions: SessionStore,
}

impl AppState {
    /// Wrap a loaded bot with a fresh session store
    pub fn new(bot: DocBot) -> Self {
        Self {
            bot: Arc::new(bot),
            sessions: SessionStore::new(),
        }
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    #[serde(default)]
    pub message: Option<String>,

    /// Session to continue; absent or unknown ids start a new session
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response of `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub sources: Vec<SourceRef>,
    pub timestamp: String,
}

/// Response of `GET /api/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub docs_loaded: usize,
    pub docs_file_exists: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/status", get(status))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve the chat API until the process exits
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("docbot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn chat(State(state): State<AppState>, Json(payload): Json<ChatRequest>) -> Response {
    let message = payload.message.unwrap_or_default();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No message provided".to_string(),
            }),
        )
            .into_response();
    }

    match handle_chat(&state, &message, payload.session_id.as_deref()) {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Error in chat endpoint: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn handle_chat(
    state: &AppState,
    message: &str,
    session_id: Option<&str>,
) -> std::result::Result<ChatResponse, SessionError> {
    let session_id = state.sessions.ensure(session_id)?;
    let (response, sources) = state.bot.chat(message);
    state.sessions.append(&session_id, message, &response)?;

    Ok(ChatResponse {
        session_id,
        response,
        sources,
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        docs_loaded: state.bot.docs_loaded(),
        docs_file_exists: state.bot.docs_file_exists(),
    })
}
