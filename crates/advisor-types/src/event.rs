//! Event types for the conversation event bus.
//!
//! `ConversationEvent` is broadcast by the stream driver as a conversation
//! progresses. All variants are Clone + Send + Sync for use with tokio
//! broadcast channels.

use serde::{Deserialize, Serialize};

use crate::chat::StreamOutcome;

/// Category of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    RateLimited,
    PaymentRequired,
    Error,
}

/// A user-facing notification raised when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Events emitted while a conversation is driven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// The user's message was appended (before the request is issued).
    UserMessage { content: String },

    /// The in-progress assistant message now has this cumulative content.
    AssistantContent { content: String },

    /// A request or stream failed; carries the notification to show.
    Notice(Notice),

    /// The stream finished.
    Settled { outcome: StreamOutcome },
}
