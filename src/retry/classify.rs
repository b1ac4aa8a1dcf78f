//! Classify HTTP statuses and reqwest errors into retry policy error kinds.

use super::error::TransportError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
///
/// Server-class statuses (>= 500) are retryable; everything below that,
/// including 429, is left to the caller (override via a custom predicate).
pub fn classify_http_status(code: u16) -> ErrorKind {
    match code {
        503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code),
        _ => ErrorKind::Other,
    }
}

/// Classify a network-level reqwest error for retry decisions.
pub fn classify_network_error(e: &reqwest::Error) -> ErrorKind {
    if e.is_timeout() {
        return ErrorKind::Timeout;
    }
    if e.is_connect() || e.is_body() || e.is_request() {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a transport error into an `ErrorKind`.
pub fn classify(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::Network(ne) => classify_network_error(ne),
        TransportError::Http { status, .. } => classify_http_status(*status),
        TransportError::Cancelled | TransportError::InvalidRequest(_) => ErrorKind::Other,
    }
}
