// src/routes/mod.rs
pub mod agent;
pub mod chat;

use crate::state::SharedState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use agent::agent_reaction_handler;
use chat::chat_handler;
use tower_http::trace::TraceLayer;

use crate::message::HealthResponse;
use crate::services::persona::{LIVENESS_MESSAGE, SERVICE_NAME};

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(|| async { LIVENESS_MESSAGE }))
        .route("/health", get(health_handler))
        .route("/agent_reaction", get(agent_reaction_handler))
        .route("/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
