//! Key-press handling for message composition.
//!
//! Plain Enter submits the composed message; Enter with any modifier
//! (Shift, Alt, Ctrl) inserts a literal newline instead.

/// The key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Backspace,
    Other,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl KeyPress {
    /// An unmodified key press.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
        }
    }

    /// Shift held with the key.
    pub fn shifted(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    fn is_modified(&self) -> bool {
        self.shift || self.alt || self.ctrl
    }
}

/// What the composer should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    /// Not handled here; default text editing applies.
    Passthrough,
}

pub fn key_action(press: &KeyPress) -> KeyAction {
    match press.key {
        Key::Enter if press.is_modified() => KeyAction::InsertNewline,
        Key::Enter => KeyAction::Submit,
        _ => KeyAction::Passthrough,
    }
}

/// A message being composed, driven by key presses.
#[derive(Debug, Clone, Default)]
pub struct ComposeBuffer {
    text: String,
}

impl ComposeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Apply a key press. Returns the composed text, leaving the buffer
    /// empty, when the press submits.
    pub fn apply(&mut self, press: &KeyPress) -> Option<String> {
        match key_action(press) {
            KeyAction::Submit => Some(std::mem::take(&mut self.text)),
            KeyAction::InsertNewline => {
                self.text.push('\n');
                None
            }
            KeyAction::Passthrough => {
                match press.key {
                    Key::Char(c) => self.text.push(c),
                    Key::Backspace => {
                        self.text.pop();
                    }
                    Key::Enter | Key::Other => {}
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_enter_submits() {
        assert_eq!(key_action(&KeyPress::plain(Key::Enter)), KeyAction::Submit);
    }

    #[test]
    fn modified_enter_inserts_newline() {
        assert_eq!(
            key_action(&KeyPress::shifted(Key::Enter)),
            KeyAction::InsertNewline
        );
        let alt = KeyPress {
            alt: true,
            ..KeyPress::plain(Key::Enter)
        };
        assert_eq!(key_action(&alt), KeyAction::InsertNewline);
    }

    #[test]
    fn other_keys_pass_through() {
        assert_eq!(
            key_action(&KeyPress::shifted(Key::Char('A'))),
            KeyAction::Passthrough
        );
    }

    #[test]
    fn compose_multi_line_message() {
        let mut buffer = ComposeBuffer::new();
        for c in "line one".chars() {
            assert!(buffer.apply(&KeyPress::plain(Key::Char(c))).is_none());
        }
        assert!(buffer.apply(&KeyPress::shifted(Key::Enter)).is_none());
        buffer.push_str("line twoo");
        buffer.apply(&KeyPress::plain(Key::Backspace));

        let submitted = buffer.apply(&KeyPress::plain(Key::Enter));
        assert_eq!(submitted.as_deref(), Some("line one\nline two"));
        assert!(buffer.text().is_empty());
    }
}
