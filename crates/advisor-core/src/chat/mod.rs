//! Conversation state, the stream driver and the transport seam.

pub mod conversation;
pub mod driver;
pub mod input;
pub mod transport;

pub use conversation::Conversation;
pub use driver::{ChatOptions, ChatSession, RejectReason, SendOutcome, notice_for};
pub use input::{ComposeBuffer, Key, KeyAction, KeyPress, key_action};
pub use transport::{ByteStream, CompletionTransport};
