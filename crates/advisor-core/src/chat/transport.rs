//! CompletionTransport trait definition.
//!
//! The transport issues the outbound request and hands back the raw
//! response body as a stream of byte chunks. It knows nothing about lines,
//! events or JSON; decoding happens in [`crate::stream`].
//!
//! Implementations live in advisor-infra (e.g., `HttpTransport`).

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use advisor_types::error::{StreamError, TransportError};
use advisor_types::llm::CompletionRequest;

/// Raw response body: byte chunks in delivery order, no alignment to lines.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, StreamError>> + Send + 'static>>;

/// Trait for completion service transports.
///
/// Uses native async fn in traits (RPITIT) for `open_stream`.
pub trait CompletionTransport: Send + Sync {
    /// Human-readable transport name for logs.
    fn name(&self) -> &str;

    /// Send the request. Resolves once the service answered with a success
    /// status and a readable body, or with the error category otherwise.
    fn open_stream(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<ByteStream, TransportError>> + Send;
}
