use thiserror::Error;

/// Errors raised before a response body is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("payment required, please add credits to continue")]
    PaymentRequired,

    /// Any other non-success status. `message` is the server-provided
    /// message, or `HTTP <status>` when the body carried none.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Build the error for a non-success status and optional server message.
    pub fn from_status(status: u16, server_message: Option<&str>) -> Self {
        match status {
            429 => TransportError::RateLimited,
            402 => TransportError::PaymentRequired,
            _ => TransportError::Status {
                status,
                message: server_message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {status}")),
            },
        }
    }
}

/// Errors that abort a stream after the body started arriving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("stream read error: {0}")]
    Read(String),

    #[error("no data received for {0}s")]
    IdleTimeout(u64),

    #[error("response cancelled")]
    Cancelled,
}

/// Any failure of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("credential '{0}' is not set")]
    MissingCredential(String),

    #[error("unknown advisor '{0}'")]
    UnknownAdvisor(String),
}
