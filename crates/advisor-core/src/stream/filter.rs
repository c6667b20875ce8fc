//! Classification of framed lines.
//!
//! Recognised shapes:
//! - blank line, or a line starting with `:` (comment / keep-alive)
//! - `data: <payload>`
//! - `data: [DONE]` (logical end of generation)
//!
//! Anything else is dropped silently; the upstream protocol may emit lines
//! this decoder has no use for (`event:`, `id:`, `retry:`).

/// First character of a comment or keep-alive line.
pub const COMMENT_MARKER: char = ':';

/// Prefix of a data event line.
pub const DATA_PREFIX: &str = "data:";

/// The single separator expected between the prefix and the payload.
pub const DATA_SEPARATOR: char = ' ';

/// Reserved payload marking the logical end of generation.
pub const TERMINATOR: &str = "[DONE]";

/// What a framed line means to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank, comment, or unrecognised line.
    Ignorable,
    /// A data event with its trimmed payload.
    Data(&'a str),
    /// The `[DONE]` sentinel.
    Terminator,
}

/// Classify one framed line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
        return LineKind::Ignorable;
    }

    let Some(payload) = line
        .strip_prefix(DATA_PREFIX)
        .and_then(|rest| rest.strip_prefix(DATA_SEPARATOR))
    else {
        return LineKind::Ignorable;
    };

    match payload.trim() {
        "" => LineKind::Ignorable,
        TERMINATOR => LineKind::Terminator,
        trimmed => LineKind::Data(trimmed),
    }
}
