//! HTTP transport for the streaming completion endpoint.
//!
//! POSTs the conversation as JSON with a bearer credential and, on a
//! success status, hands the chunked response body to the decoder as raw
//! bytes. Non-success statuses are mapped to [`TransportError`] using the
//! server-provided message when the body carries one.

use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use advisor_core::chat::{ByteStream, CompletionTransport};
use advisor_types::error::{StreamError, TransportError};
use advisor_types::llm::{CompletionRequest, ErrorBody};

/// Completion transport over reqwest.
///
/// # Credential Security
///
/// The key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header. It never appears in Debug output.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl HttpTransport {
    /// Create a transport for `endpoint`.
    ///
    /// No request timeout is configured: a response streams for as long as
    /// the service keeps the body open. Idle detection is the driver's job.
    pub fn new(endpoint: impl Into<String>, api_key: SecretString) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl CompletionTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn open_stream(&self, request: &CompletionRequest) -> Result<ByteStream, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, messages = request.messages.len(), "completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, "completion service error response");
            return Err(error_for_status(status.as_u16(), &error_body));
        }

        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| StreamError::Read(e.to_string()))
            });
        Ok(Box::pin(body))
    }
}

/// Map a non-success status and its raw body to a transport error.
pub fn error_for_status(status: u16, body: &str) -> TransportError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed.as_ref().and_then(ErrorBody::server_message);
    TransportError::from_status(status, message)
}
