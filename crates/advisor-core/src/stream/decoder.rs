//! Line framing, classification and payload decoding in one state machine.
//!
//! Recovery policy for payloads that fail to parse: the line is put back
//! (with its newline) at the front of the pending buffer and the current
//! batch stops. The parse is retried when the next chunk arrives. At
//! end-of-stream the remaining buffer is parsed one last time and anything
//! still unparsable is discarded.
//!
//! A genuinely malformed line therefore holds back the lines behind it until
//! the stream ends. `max_payload_retries` bounds that: after the given number
//! of failed re-parses the line is dropped and decoding continues.

use tracing::{debug, warn};

use super::framer::LineFramer;
use super::payload::{Decoded, decode_line};

/// Incremental decoder from raw transport bytes to text fragments.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    framer: LineFramer,
    max_payload_retries: Option<u32>,
    /// Failed parses of the line currently held at the buffer front.
    failed_attempts: u32,
    terminated: bool,
    finished: bool,
    dropped: usize,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that drops an unparsable payload after `limit`
    /// failed re-parses. `None` retries until the stream ends.
    pub fn with_retry_limit(limit: Option<u32>) -> Self {
        Self {
            max_payload_retries: limit,
            ..Self::default()
        }
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Number of payloads discarded because they never parsed.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Feed one transport chunk, returning fragments in delivery order.
    ///
    /// After the terminator, input is drained and discarded.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.terminated || self.finished {
            return Vec::new();
        }

        self.framer.push(chunk);
        let mut fragments = Vec::new();

        while let Some(line) = self.framer.next_line() {
            match decode_line(&line) {
                Decoded::Fragment(text) => {
                    self.failed_attempts = 0;
                    fragments.push(text);
                }
                Decoded::Ignorable => {
                    self.failed_attempts = 0;
                }
                Decoded::Terminator => {
                    debug!("stream terminator received");
                    self.terminate();
                    break;
                }
                Decoded::Incomplete => {
                    self.failed_attempts += 1;
                    if self.retries_exhausted() {
                        warn!(
                            attempts = self.failed_attempts,
                            "dropping payload that never became parseable"
                        );
                        self.failed_attempts = 0;
                        self.dropped += 1;
                        continue;
                    }
                    self.framer.push_front_line(&line);
                    break;
                }
            }
        }

        fragments
    }

    /// Flush at end-of-stream: decode every buffered line, including a
    /// final line with no trailing newline, exactly once.
    pub fn finish(&mut self) -> Vec<String> {
        if self.terminated || self.finished {
            return Vec::new();
        }
        self.finished = true;

        let mut fragments = Vec::new();
        let mut lines: Vec<String> = std::iter::from_fn(|| self.framer.next_line()).collect();
        lines.extend(self.framer.flush());

        for line in lines {
            match decode_line(&line) {
                Decoded::Fragment(text) => fragments.push(text),
                Decoded::Ignorable => {}
                Decoded::Terminator => {
                    self.terminated = true;
                    break;
                }
                Decoded::Incomplete => {
                    debug!("discarding unparsable payload at end of stream");
                    self.dropped += 1;
                }
            }
        }

        fragments
    }

    fn retries_exhausted(&self) -> bool {
        self.max_payload_retries
            .is_some_and(|limit| self.failed_attempts > limit)
    }

    fn terminate(&mut self) {
        self.terminated = true;
        self.failed_attempts = 0;
        self.framer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(text: &str) -> String {
        format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{text}\"}}}}]}}\n")
    }

    fn decode_all(chunks: &[&[u8]]) -> String {
        let mut decoder = StreamDecoder::new();
        let mut out = String::new();
        for chunk in chunks {
            out.extend(decoder.push(chunk));
        }
        out.extend(decoder.finish());
        out
    }

    #[test]
    fn fragments_in_order_for_any_split() {
        let body = format!("{}{}{}", delta("A"), delta("B"), delta("C"));
        let bytes = body.as_bytes();
        for size in 1..=bytes.len() {
            let chunks: Vec<&[u8]> = bytes.chunks(size).collect();
            assert_eq!(decode_all(&chunks), "ABC", "chunk size {size}");
        }
    }

    #[test]
    fn payload_split_mid_line_yields_one_fragment() {
        let first = br#"data: {"choices":[{"delta":{"conte"#;
        let second = b"nt\":\"hi\"}}]}\n";
        let mut decoder = StreamDecoder::new();
        assert!(decoder.push(first).is_empty());
        assert_eq!(decoder.push(second), vec!["hi"]);
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn comments_and_blank_lines_do_not_interrupt() {
        let body = format!("{}: keep-alive\n\n{}", delta("A"), delta("B"));
        assert_eq!(decode_all(&[body.as_bytes()]), "AB");
    }

    #[test]
    fn terminator_yields_nothing_and_discards_the_rest() {
        let body = format!("{}data: [DONE]\n{}", delta("A"), delta("late"));
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.push(body.as_bytes()), vec!["A"]);
        assert!(decoder.is_terminated());
        assert!(decoder.push(delta("after").as_bytes()).is_empty());
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn final_partial_line_is_flushed_once() {
        let mut decoder = StreamDecoder::new();
        let body = delta("end");
        let without_newline = body.trim_end_matches('\n');
        assert!(decoder.push(without_newline.as_bytes()).is_empty());
        assert_eq!(decoder.finish(), vec!["end"]);
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn unparsable_line_is_rebuffered_and_blocks_batch() {
        let body = format!("data: {{broken\n{}", delta("B"));
        let mut decoder = StreamDecoder::new();
        assert!(decoder.push(body.as_bytes()).is_empty());
        // Still blocked on the next chunk.
        assert!(decoder.push(delta("C").as_bytes()).is_empty());
        // Dropped at the end; the lines behind it are decoded.
        assert_eq!(decoder.finish(), vec!["B", "C"]);
        assert_eq!(decoder.dropped(), 1);
    }

    #[test]
    fn retry_ceiling_drops_payload_and_continues() {
        let mut decoder = StreamDecoder::with_retry_limit(Some(1));
        let body = format!("data: {{broken\n{}", delta("B"));
        assert!(decoder.push(body.as_bytes()).is_empty());
        // One re-parse allowed; the second failure drops the line.
        assert_eq!(decoder.push(delta("C").as_bytes()), vec!["B", "C"]);
        assert_eq!(decoder.dropped(), 1);
    }

    #[test]
    fn zero_retry_ceiling_drops_immediately() {
        let mut decoder = StreamDecoder::with_retry_limit(Some(0));
        let body = format!("data: nope\n{}", delta("ok"));
        assert_eq!(decoder.push(body.as_bytes()), vec!["ok"]);
    }

    #[test]
    fn terminator_in_flush_stops_decoding() {
        let mut decoder = StreamDecoder::new();
        let body = format!("data: {{broken\ndata: [DONE]\n{}", delta("late"));
        assert!(decoder.push(body.as_bytes()).is_empty());
        assert!(decoder.finish().is_empty());
        assert!(decoder.is_terminated());
    }
}
