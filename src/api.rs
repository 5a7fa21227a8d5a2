use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::assistant::{TravelAssistant, reply_guarded};

const EMPTY_QUERY_REPLY: &str = "Please type something about where you want to go.";

#[derive(Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
}

pub fn router(assistant: Arc<TravelAssistant>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .with_state(assistant)
}

async fn ask(
    State(assistant): State<Arc<TravelAssistant>>,
    Json(payload): Json<AskRequest>,
) -> (StatusCode, Json<AskResponse>) {
    if payload.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AskResponse {
                reply: EMPTY_QUERY_REPLY.to_string(),
            }),
        );
    }

    let reply = reply_guarded(assistant, payload.query).await;
    (StatusCode::OK, Json(AskResponse { reply }))
}

async fn health() -> &'static str {
    "ok"
}
