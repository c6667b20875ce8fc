//! Folds decoded fragments into the growing assistant message.

use advisor_types::event::ConversationEvent;

use crate::chat::conversation::Conversation;
use crate::event::EventBus;

/// Owns the text of the in-progress assistant message.
///
/// Each [`append`](Accumulator::append) writes the cumulative content into
/// the conversation and publishes it; observers always see the whole
/// message, never a bare delta.
#[derive(Debug)]
pub struct Accumulator {
    content: String,
    fragments: usize,
    events: EventBus,
}

impl Accumulator {
    pub fn new(events: EventBus) -> Self {
        Self {
            content: String::new(),
            fragments: 0,
            events,
        }
    }

    /// Append a fragment and publish the cumulative content.
    pub fn append(&mut self, fragment: &str, conversation: &mut Conversation) -> &str {
        self.content.push_str(fragment);
        self.fragments += 1;
        conversation.set_assistant_content(&self.content);
        self.events.publish(ConversationEvent::AssistantContent {
            content: self.content.clone(),
        });
        &self.content
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of fragments appended so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }
}
