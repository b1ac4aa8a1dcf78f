//! Client error taxonomy.

use thiserror::Error;

use crate::fetcher::BatchError;
use crate::retry::TransportError;

/// Error returned by the client surface.
///
/// Non-2xx API responses are classified into the tagged [`Error::Api`]
/// variant by parsing the `{title, description}` error body; transport
/// failures that exhausted their retries pass through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport gave up after exhausting retries.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The API answered with a non-2xx status and an error body.
    #[error("failed to call {path}, status code: {status}, error: {title}, message: {description}")]
    Api {
        path: String,
        status: u16,
        title: String,
        description: String,
    },
    /// The response body did not decode into the expected shape.
    #[error("decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The shared cancellation signal fired before the call completed.
    #[error("cancelled")]
    Cancelled,
    /// A batch worker task failed to join.
    #[error("batch worker failed: {0}")]
    Task(String),
}

impl From<BatchError<Error>> for Error {
    fn from(e: BatchError<Error>) -> Self {
        match e {
            BatchError::Fetch(inner) => inner,
            BatchError::Cancelled => Error::Cancelled,
            BatchError::Task(join) => Error::Task(join.to_string()),
        }
    }
}
