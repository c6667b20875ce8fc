//! Incremental decoder for the completion service's event stream.
//!
//! Bytes flow one way through the pipeline:
//!
//! ```text
//! transport bytes -> LineFramer -> classify_line -> decode_payload -> Accumulator
//! ```
//!
//! [`StreamDecoder`] ties the first three stages together and owns the
//! recovery policy for payloads that fail to parse.

pub mod accumulator;
pub mod decoder;
pub mod filter;
pub mod framer;
pub mod payload;

pub use accumulator::Accumulator;
pub use decoder::StreamDecoder;
pub use filter::{LineKind, classify_line};
pub use framer::LineFramer;
pub use payload::{Decoded, decode_line, decode_payload};
