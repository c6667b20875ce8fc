//! Newline framing over a raw byte stream.
//!
//! The framer buffers bytes and hands out complete lines. It works on bytes
//! rather than text so a multi-byte UTF-8 character split across two
//! transport chunks is only decoded once the whole line has arrived.

/// Splits an unbounded byte stream into newline-delimited lines.
///
/// Bytes after the last `\n` are retained until more data arrives or the
/// caller flushes at end-of-stream.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk to the pending buffer without extracting lines.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Extract the next complete line, if the buffer holds one.
    ///
    /// The `\n` is removed, as is a single trailing `\r`.
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
        line.pop();
        strip_carriage_return(&mut line);
        Some(decode(line))
    }

    /// Put a line back at the front of the buffer, followed by `\n`.
    ///
    /// The next call to [`next_line`](Self::next_line) returns it again.
    pub fn push_front_line(&mut self, line: &str) {
        let mut front = Vec::with_capacity(line.len() + 1 + self.buffer.len());
        front.extend_from_slice(line.as_bytes());
        front.push(b'\n');
        front.append(&mut self.buffer);
        self.buffer = front;
    }

    /// Append a chunk and drain every complete line it produced.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.push(chunk);
        std::iter::from_fn(|| self.next_line()).collect()
    }

    /// Take the retained partial line at end-of-stream.
    ///
    /// Returns `None` when nothing is buffered. Only call this after all
    /// complete lines have been drained.
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.buffer);
        strip_carriage_return(&mut line);
        Some(decode(line))
    }

    /// Discard everything buffered.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Bytes received but not yet returned as a line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn strip_carriage_return(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `input` in chunks of `size` bytes and rebuild it from the output.
    fn reconstruct(input: &[u8], size: usize) -> String {
        let mut framer = LineFramer::new();
        let mut rebuilt = String::new();
        for chunk in input.chunks(size) {
            for line in framer.feed(chunk) {
                rebuilt.push_str(&line);
                rebuilt.push('\n');
            }
        }
        if let Some(partial) = framer.flush() {
            rebuilt.push_str(&partial);
        }
        rebuilt
    }

    #[test]
    fn round_trip_for_every_chunk_size() {
        let input = "data: {\"a\":1}\n\n: keep-alive\ndata: caf\u{e9} \u{1f600}\ntrailing partial";
        for size in 1..=input.len() {
            assert_eq!(reconstruct(input.as_bytes(), size), input, "chunk size {size}");
        }
    }

    #[test]
    fn round_trip_with_trailing_newline_has_no_partial() {
        let input = "one\ntwo\n";
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(input.as_bytes()), vec!["one", "two"]);
        assert!(framer.flush().is_none());
    }

    #[test]
    fn retains_partial_line_across_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.feed(b"data: hel").is_empty());
        assert_eq!(framer.pending(), b"data: hel");
        assert_eq!(framer.feed(b"lo\nda"), vec!["data: hello"]);
        assert_eq!(framer.pending(), b"da");
    }

    #[test]
    fn strips_carriage_return() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b"a\r\nb\r\n"), vec!["a", "b"]);
        framer.push(b"tail\r");
        assert_eq!(framer.flush().as_deref(), Some("tail"));
    }

    #[test]
    fn multibyte_character_split_across_chunks() {
        let bytes = "\u{e9}t\u{e9}\n".as_bytes();
        let mut framer = LineFramer::new();
        assert!(framer.feed(&bytes[..1]).is_empty());
        assert_eq!(framer.feed(&bytes[1..]), vec!["\u{e9}t\u{e9}"]);
    }

    #[test]
    fn push_front_line_is_returned_first() {
        let mut framer = LineFramer::new();
        framer.push(b"second\nthi");
        framer.push_front_line("first");
        assert_eq!(framer.next_line().as_deref(), Some("first"));
        assert_eq!(framer.next_line().as_deref(), Some("second"));
        assert_eq!(framer.next_line(), None);
        assert_eq!(framer.flush().as_deref(), Some("thi"));
        assert!(framer.is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced_not_dropped() {
        let mut framer = LineFramer::new();
        let lines = framer.feed(b"ok\xff\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ok"));
    }
}
