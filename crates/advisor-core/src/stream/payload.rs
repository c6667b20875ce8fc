//! Data payload decoding.
//!
//! A payload is JSON whose incremental text lives at
//! `choices[0].delta.content`. Failing to parse is reported as
//! [`Decoded::Incomplete`] rather than an error: the caller decides whether
//! to wait for more bytes or give up.

use advisor_types::llm::delta_text;

use super::filter::{LineKind, classify_line};

/// Result of decoding one framed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A non-empty text increment.
    Fragment(String),
    /// The logical end of generation.
    Terminator,
    /// Nothing to emit (comment, blank, role-only delta, other shapes).
    Ignorable,
    /// The payload did not parse; it may still be waiting on bytes.
    Incomplete,
}

/// Decode a trimmed data payload.
pub fn decode_payload(payload: &str) -> Decoded {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return Decoded::Incomplete,
    };

    if !value.is_object() {
        return Decoded::Ignorable;
    }

    delta_text(&value)
        .map(|text| Decoded::Fragment(text.to_string()))
        .unwrap_or(Decoded::Ignorable)
}

/// Classify and decode one framed line.
pub fn decode_line(line: &str) -> Decoded {
    match classify_line(line) {
        LineKind::Ignorable => Decoded::Ignorable,
        LineKind::Terminator => Decoded::Terminator,
        LineKind::Data(payload) => decode_payload(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hel"}},{"delta":{"content":"x"}}]}"#;
        assert_eq!(decode_line(line), Decoded::Fragment("Hel".to_string()));
    }

    #[test]
    fn role_only_and_finish_chunks_are_ignorable() {
        assert_eq!(
            decode_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            Decoded::Ignorable
        );
        assert_eq!(
            decode_line(r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#),
            Decoded::Ignorable
        );
        assert_eq!(decode_line(r#"data: {"choices":[]}"#), Decoded::Ignorable);
    }

    #[test]
    fn truncated_json_is_incomplete() {
        assert_eq!(
            decode_line(r#"data: {"choices":[{"delta":{"conte"#),
            Decoded::Incomplete
        );
        assert_eq!(decode_payload("not json"), Decoded::Incomplete);
    }

    #[test]
    fn non_object_json_is_ignorable() {
        assert_eq!(decode_payload("42"), Decoded::Ignorable);
        assert_eq!(decode_payload(r#""text""#), Decoded::Ignorable);
        assert_eq!(decode_payload("[1,2]"), Decoded::Ignorable);
    }

    #[test]
    fn object_with_mismatched_types_is_ignorable() {
        assert_eq!(
            decode_payload(r#"{"choices":"nope"}"#),
            Decoded::Ignorable
        );
    }

    #[test]
    fn odd_later_choices_do_not_hide_the_first() {
        assert_eq!(
            decode_payload(r#"{"choices":[{"delta":{"content":"A"}},{"delta":null}]}"#),
            Decoded::Fragment("A".to_string())
        );
        assert_eq!(
            decode_payload(r#"{"choices":[{"delta":{"content":"A"}},7]}"#),
            Decoded::Fragment("A".to_string())
        );
    }

    #[test]
    fn terminator_and_comments_pass_through() {
        assert_eq!(decode_line("data: [DONE]"), Decoded::Terminator);
        assert_eq!(decode_line(": ping"), Decoded::Ignorable);
    }

    #[test]
    fn whitespace_content_is_a_fragment() {
        assert_eq!(
            decode_line(r#"data: {"choices":[{"delta":{"content":" "}}]}"#),
            Decoded::Fragment(" ".to_string())
        );
    }
}
