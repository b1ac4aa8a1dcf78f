//! Retry loop: run an async operation until success or the policy says stop.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::error::TransportError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds, the policy gives up, or `cancel` fires.
///
/// `retryable` is consulted on every failure; the backoff schedule always
/// comes from `policy`. On a retryable failure, sleeps for the backoff
/// duration (racing the cancellation token) then tries again. The last
/// received error is returned once retries are exhausted.
pub async fn run_with_retry<T, F, Fut, P>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    retryable: P,
    mut op: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
    P: Fn(&TransportError) -> bool,
{
    let mut attempt = 1u32;
    loop {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            res = op() => res,
        };
        match outcome {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, retryable(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after backoff"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
            },
        }
    }
}
