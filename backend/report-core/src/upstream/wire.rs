//! Chat completion wire format.
//!
//! Outbound types are strict. Inbound replies are read by JSON pointer, so a
//! degenerate reply degrades to "no content" instead of a parse error.

use crate::config::GenerationSettings;

use serde::Serialize;
use serde_json::Value;

/// Fixed user turn appended after the system prompt.
pub const REPORT_INSTRUCTION: &str = "Generate a pool water treatment report.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatCompletionRequest {
    pub fn for_prompt(prompt: &str, settings: &GenerationSettings) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: prompt.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: REPORT_INSTRUCTION.to_string(),
                },
            ],
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

// ============================================
// INBOUND
// ============================================

const FIRST_CHOICE_CONTENT: &str = "/choices/0/message/content";
const ERROR_MESSAGE: &str = "/error/message";
const ERROR_TEXT: &str = "/error";

/// `choices[0].message.content`, trimmed; `None` if absent, malformed or blank.
///
/// Only the first choice is inspected, so junk in later choices is ignored.
pub fn completion_content(body: &str) -> Option<String> {
    let response: Value = serde_json::from_str(body).ok()?;
    non_blank(response.pointer(FIRST_CHOICE_CONTENT)?.as_str()?)
}

/// Provider-supplied error text from a rejection body, if there is any.
///
/// Accepts `{"error": {"message": "..."}}` and `{"error": "..."}`.
pub fn rejection_message(body: &str) -> Option<String> {
    let envelope: Value = serde_json::from_str(body).ok()?;
    let message = envelope
        .pointer(ERROR_MESSAGE)
        .or_else(|| envelope.pointer(ERROR_TEXT))
        .and_then(Value::as_str)?;
    non_blank(message)
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
