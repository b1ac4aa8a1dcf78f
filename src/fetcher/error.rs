//! Batch fetch error type.

use thiserror::Error;

/// Error surfaced by a batch fetch.
///
/// Carries the first failure observed; later failures from the same batch
/// are discarded. The fetcher never inspects the inner fetch error, only
/// propagates it.
#[derive(Debug, Error)]
pub enum BatchError<E> {
    /// A per-identifier fetch failed.
    #[error("fetch failed: {0}")]
    Fetch(E),
    /// The shared cancellation signal fired before the batch completed.
    #[error("batch cancelled")]
    Cancelled,
    /// A worker task failed to join (panicked or was aborted).
    #[error("fetch task failed: {0}")]
    Task(tokio::task::JoinError),
}
