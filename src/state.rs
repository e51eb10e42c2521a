// src/state.rs
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::gemini::ChatModel;

pub type SharedState = Arc<AppState>;

/// Read-only after startup; shared by every request.
pub struct AppState {
    pub model: Arc<dyn ChatModel>,
    pub agent_images_dir: PathBuf,
}

impl AppState {
    pub fn new(model: Arc<dyn ChatModel>, agent_images_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            agent_images_dir: agent_images_dir.into(),
        }
    }
}
