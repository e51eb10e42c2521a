// src/routes/agent.rs
use std::io::ErrorKind;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{error::AppError, state::SharedState};

pub const AGENT_IMAGE_FILE: &str = "cecilia_chat.png";

/// Serve Cecília's chat avatar.
pub async fn agent_reaction_handler(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.agent_images_dir.join(AGENT_IMAGE_FILE);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Arquivo '{}' não encontrado.",
            AGENT_IMAGE_FILE
        ))),
        Err(e) => Err(e.into()),
    }
}
