//! Transport error type used for retry classification.

use thiserror::Error;

/// Error from a single logical HTTP exchange: a network failure, or a
/// retryable status the policy gave up on. Carries the final cause after
/// retries are exhausted.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or its body could not be read.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    /// Retryable HTTP status, surfaced after retry exhaustion.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    /// The shared cancellation signal fired before the exchange completed.
    #[error("request cancelled")]
    Cancelled,
    /// The request descriptor could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Final HTTP status, when the failure was status-shaped.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            TransportError::Cancelled | TransportError::InvalidRequest(_) => None,
        }
    }
}
