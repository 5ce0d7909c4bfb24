use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use sidekick_chat::{ChatError, ChatOrchestrator};
use sidekick_types::{ChatRequest, ChatResponse};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Create router with the API routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// POST /api/chat - Answer one message, with at most one tool round trip
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);
    let response = state.orchestrator.handle(request).instrument(span).await?;

    Ok(Json(response))
}

/// Error type for HTTP handlers
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Chat(ChatError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::Chat(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "rejected chat request body");
                msg
            }
            AppError::Chat(ChatError::Upstream(err)) => {
                tracing::error!(error = %err, "completion request failed");
                err.to_string()
            }
            AppError::Chat(err) => err.to_string(),
        };

        let body = Json(serde_json::json!({ "error": message }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
