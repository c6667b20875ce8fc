//! Chat message and stream lifecycle types.
//!
//! A conversation is an ordered sequence of [`ChatMessage`]s. While a
//! response is streaming, the last assistant message grows in place; once
//! the stream settles it is never touched again.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation with an advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Lifecycle state of the stream driver.
///
/// `Idle -> Sending -> Streaming -> Settled(..)`; a settled driver accepts
/// the next submission and moves back to `Sending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "outcome", rename_all = "snake_case")]
pub enum StreamState {
    #[default]
    Idle,
    Sending,
    Streaming,
    Settled(StreamOutcome),
}

impl StreamState {
    /// Whether a request is in flight (submission is rejected).
    pub fn is_active(&self) -> bool {
        matches!(self, StreamState::Sending | StreamState::Streaming)
    }
}

/// How a stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamOutcome {
    Success,
    Error,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Idle => write!(f, "idle"),
            StreamState::Sending => write!(f, "sending"),
            StreamState::Streaming => write!(f, "streaming"),
            StreamState::Settled(StreamOutcome::Success) => write!(f, "settled(success)"),
            StreamState::Settled(StreamOutcome::Error) => write!(f, "settled(error)"),
        }
    }
}
