//! Completion service request/response types.
//!
//! These types model the wire shapes exchanged with the remote completion
//! service: the outbound request body, the per-event streaming chunk, and
//! the JSON error bodies returned on non-success statuses.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Request body POSTed to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full conversation history including the new user message.
    pub messages: Vec<ChatMessage>,
    /// Slug of the advisor persona answering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor: Option<String>,
    /// Persona system prompt, when the client supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub stream: bool,
}

/// JSON pointer to a streamed chunk's incremental text.
pub const DELTA_CONTENT_POINTER: &str = "/choices/0/delta/content";

/// The first choice's delta text of a streamed chunk, if present and non-empty.
///
/// Only `choices[0].delta.content` is looked at; the shape of any other
/// choice or field does not matter.
pub fn delta_text(chunk: &serde_json::Value) -> Option<&str> {
    chunk
        .pointer(DELTA_CONTENT_POINTER)
        .and_then(serde_json::Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Error body returned by the completion service on failure.
///
/// Understands `{"error": "msg"}`, `{"error": {"message": "msg"}}` and
/// `{"message": "msg"}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ErrorBody {
    /// The server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        let from_error = match &self.error {
            Some(ErrorDetail::Text(text)) => Some(text.as_str()),
            Some(ErrorDetail::Object { message }) => message.as_deref(),
            None => None,
        };
        from_error
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
