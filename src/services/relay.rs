// src/services/relay.rs
use tracing::debug;

use super::gemini::{ChatModel, Content, ModelError, ROLE_MODEL, ROLE_USER};
use crate::message::ChatMessage;

/// Caller-side label that the provider knows as `model`.
pub const CALLER_ASSISTANT_ROLE: &str = "assistant";

/// Translate a caller role into the provider's vocabulary. Anything other
/// than the assistant label passes through untouched.
pub fn map_role(role: &str) -> &str {
    if role == CALLER_ASSISTANT_ROLE {
        ROLE_MODEL
    } else {
        role
    }
}

pub fn to_content(message: &ChatMessage) -> Content {
    let role = map_role(&message.role);
    if role != ROLE_MODEL && role != ROLE_USER {
        debug!(role, "passing through unrecognised role");
    }
    Content::new(role, message.content.as_str())
}

/// Split a conversation into prior history and the new turn.
/// Returns `None` for an empty conversation.
pub fn split_turns(messages: &[ChatMessage]) -> Option<(Vec<Content>, Content)> {
    let (last, earlier) = messages.split_last()?;
    let history = earlier.iter().map(to_content).collect();
    Some((history, Content::new(ROLE_USER, last.content.as_str())))
}

/// Forward a conversation to the model and return its reply. Exactly one
/// upstream call per invocation; nothing is retried.
pub async fn relay(
    model: &dyn ChatModel,
    history: Vec<Content>,
    message: Content,
) -> Result<String, ModelError> {
    debug!(history_len = history.len(), "relaying chat turn");
    model.send_message(history, message).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn assistant_becomes_model() {
        assert_eq!(map_role("assistant"), "model");
        assert_eq!(map_role("user"), "user");
        assert_eq!(map_role("system"), "system");
    }

    #[test]
    fn empty_conversation_has_no_turns() {
        assert!(split_turns(&[]).is_none());
    }

    #[test]
    fn last_message_is_the_new_turn() {
        let messages = vec![
            msg("user", "Oi"),
            msg("assistant", "Olá! 🎼 O que vamos estudar?"),
            msg("user", "Escala de Ré maior"),
        ];
        let (history, turn) = split_turns(&messages).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role.as_deref(), Some("model"));
        assert_eq!(history[1].text(), "Olá! 🎼 O que vamos estudar?");
        assert_eq!(turn.text(), "Escala de Ré maior");
        assert_eq!(turn.role.as_deref(), Some("user"));
    }
}
