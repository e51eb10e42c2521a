// src/routes/chat.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::relay::{relay, split_turns},
    state::SharedState,
};

pub const INVALID_REQUEST_MESSAGE: &str = "Requisição inválida. 'messages' não encontrado.";

/// Receive the chat history and return the model's reply.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "rejecting chat request body");
        AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string())
    })?;

    let (history, message) = split_turns(&payload.messages)
        .ok_or_else(|| AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()))?;

    let reply = relay(state.model.as_ref(), history, message).await?;

    Ok(Json(ChatResponse { reply }))
}
