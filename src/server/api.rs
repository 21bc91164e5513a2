use crate::llm::chat::ChatClient;
use crate::models::chat::{ ErrorBody, RelayRequest };
use std::error::Error as StdError;
use std::sync::Arc;
use axum::{
    body::Bytes,
    routing::post,
    Router,
    Json,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };
use uuid::Uuid;

pub const CHAT_ROUTE: &str = "/api/chat";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Upstream call failed: {0}")]
    Upstream(Box<dyn StdError + Send + Sync>),
}

impl RelayError {
    pub fn category(&self) -> &'static str {
        match self {
            RelayError::InvalidBody(_) => "Invalid request body",
            RelayError::Upstream(_) => "Failed to fetch from DeepSeek API",
        }
    }

    fn details(&self) -> String {
        match self {
            RelayError::InvalidBody(e) => e.to_string(),
            RelayError::Upstream(e) => e.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.category().to_string(),
            details: Some(self.details()),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Shared only by reference: the relay keeps no per-conversation state.
#[derive(Clone)]
pub struct AppState {
    chat_client: Arc<dyn ChatClient>,
}

impl AppState {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }
}

pub fn router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        .route(CHAT_ROUTE, post(chat_handler))
        .with_state(state);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JsonValue>, RelayError> {
    let request_id = Uuid::new_v4();

    let req: RelayRequest = serde_json::from_slice(&body).map_err(|e| {
        error!("[{}] Rejected request body: {}", request_id, e);
        RelayError::from(e)
    })?;
    info!("[{}] Relaying {} message(s) to {}", request_id, req.messages.len(), state.chat_client.get_model());

    match state.chat_client.complete(&req.messages).await {
        Ok(message) => {
            info!("[{}] Upstream replied", request_id);
            Ok(Json(message))
        }
        Err(e) => {
            error!("[{}] DeepSeek API Error: {}", request_id, e);
            Err(RelayError::Upstream(e))
        }
    }
}
