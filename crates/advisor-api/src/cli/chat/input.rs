//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline`. A terminal line editor cannot report
//! modifier keys with Enter, so a line ending in `\` stands in for
//! Shift+Enter: it inserts a newline and keeps composing. Each line is fed
//! through a [`ComposeBuffer`] as key presses.

use advisor_core::chat::{ComposeBuffer, Key, KeyPress};
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// User submitted a (possibly multi-line) message.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
    prompt: String,
    continuation_prompt: String,
}

impl ChatInput {
    /// Create a new chat input handler.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String, continuation_prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt.clone())?;
        Ok((
            Self {
                rl,
                prompt,
                continuation_prompt,
            },
            stdout,
        ))
    }

    /// Read one message, following `\` continuations across lines.
    pub async fn read_message(&mut self) -> InputEvent {
        let mut buffer = ComposeBuffer::new();
        loop {
            let event = match self.rl.readline().await {
                Ok(ReadlineEvent::Line(line)) => line,
                Ok(ReadlineEvent::Eof) => return InputEvent::Eof,
                Ok(ReadlineEvent::Interrupted) => {
                    self.reset_prompt();
                    return InputEvent::Interrupted;
                }
                Err(_) => return InputEvent::Eof,
            };
            self.rl.add_history_entry(event.clone());

            match feed_line(&mut buffer, &event) {
                Some(message) => {
                    self.reset_prompt();
                    return InputEvent::Message(message);
                }
                None => {
                    let _ = self.rl.update_prompt(&self.continuation_prompt);
                }
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    fn reset_prompt(&mut self) {
        let _ = self.rl.update_prompt(&self.prompt);
    }
}

/// Feed one entered line into the buffer. Returns the message when the line
/// submits it.
pub fn feed_line(buffer: &mut ComposeBuffer, line: &str) -> Option<String> {
    match line.strip_suffix('\\') {
        Some(head) => {
            buffer.push_str(head);
            buffer.apply(&KeyPress::shifted(Key::Enter))
        }
        None => {
            buffer.push_str(line);
            buffer.apply(&KeyPress::plain(Key::Enter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_submits() {
        let mut buffer = ComposeBuffer::new();
        assert_eq!(feed_line(&mut buffer, "hello").as_deref(), Some("hello"));
    }

    #[test]
    fn trailing_backslash_continues() {
        let mut buffer = ComposeBuffer::new();
        assert_eq!(feed_line(&mut buffer, "first\\"), None);
        assert_eq!(feed_line(&mut buffer, "second\\"), None);
        assert_eq!(
            feed_line(&mut buffer, "third").as_deref(),
            Some("first\nsecond\nthird")
        );
        assert!(buffer.text().is_empty());
    }
}
