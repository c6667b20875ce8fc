//! The ordered message sequence of one conversation.
//!
//! Messages are append-only. The one exception is the in-progress assistant
//! message: while a stream is active it is the last element and its content
//! is replaced with each cumulative update. Settling the stream freezes it.

use advisor_types::chat::{ChatMessage, MessageRole};

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    in_progress: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the last message is an assistant reply still being streamed.
    pub fn has_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.finalize();
        self.messages.push(ChatMessage::user(content));
    }

    /// Replace the in-progress assistant content, creating the message on
    /// the first call.
    pub fn set_assistant_content(&mut self, content: &str) {
        match self.messages.last_mut() {
            Some(last) if self.in_progress && last.role == MessageRole::Assistant => {
                last.content.clear();
                last.content.push_str(content);
            }
            _ => {
                self.messages.push(ChatMessage::assistant(content));
                self.in_progress = true;
            }
        }
    }

    /// Remove the in-progress assistant message, if any.
    pub fn discard_in_progress(&mut self) {
        if self.in_progress {
            self.messages.pop();
            self.in_progress = false;
        }
    }

    /// Freeze the in-progress assistant message.
    pub fn finalize(&mut self) {
        self.in_progress = false;
    }

    /// Append a complete assistant message (used for error replies).
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.finalize();
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.in_progress = false;
    }
}
