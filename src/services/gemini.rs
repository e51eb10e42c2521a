// src/services/gemini.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::persona::{GenerationConfig, Persona, SafetySetting};

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One role-tagged turn in the provider's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to the model provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("prompt was blocked by the model provider: {0}")]
    Blocked(String),

    #[error("model provider returned no text")]
    EmptyReply,
}

/// A remote chat model. Given prior turns and a new turn, produce the reply text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn send_message(&self, history: Vec<Content>, message: Content)
    -> Result<String, ModelError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, ModelError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(ModelError::Blocked(reason));
        };

        let text = candidate.content.map(|c| c.text()).unwrap_or_default();
        if text.is_empty() {
            if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
                return Err(ModelError::Blocked(reason));
            }
            return Err(ModelError::EmptyReply);
        }
        Ok(text)
    }
}

/// HTTP client for the `generateContent` endpoint. Built once at startup and shared.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    persona: Persona,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: &str,
        base_url: &str,
        persona: Persona,
    ) -> Self {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
            persona,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn send_message(
        &self,
        history: Vec<Content>,
        message: Content,
    ) -> Result<String, ModelError> {
        let mut contents = history;
        contents.push(message);

        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: self.persona.system_instruction.clone(),
                }],
            },
            contents,
            generation_config: &self.persona.generation_config,
            safety_settings: &self.persona.safety_settings,
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "model provider rejected the request");
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<GenerateContentResponse>().await?.into_text()
    }
}
