//! Broadcast event bus for distributing `ConversationEvent` to observers.
//!
//! Built on `tokio::sync::broadcast`. Publishing is synchronous, so an
//! event is visible to subscribers before the driver processes the next
//! fragment. Publishing with no active subscribers is a no-op.

use advisor_types::event::ConversationEvent;
use tokio::sync::broadcast;

/// Default channel capacity; a slow observer lags rather than blocking the
/// stream.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Multi-consumer event bus for conversation updates.
///
/// Cloning the bus clones the sender, allowing multiple producers.
pub struct EventBus {
    sender: broadcast::Sender<ConversationEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ConversationEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
