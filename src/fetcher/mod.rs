//! Bounded fan-out/fan-in fetcher.
//!
//! Runs one fetch per identifier with a hard cap on in-flight operations,
//! collecting every success or surfacing the first failure. The scheduling
//! loop is the single consumer of task completions, so result aggregation
//! needs no lock.

mod error;

pub use error::BatchError;

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Cap on in-flight fetches when the caller does not configure one.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Fetches every identifier in `ids` with at most `max_concurrency`
/// fetches in flight, returning all results or the first observed error.
///
/// Result order is arbitrary (completions are appended as they arrive);
/// duplicate identifiers produce duplicate fetches. `fetch` receives a
/// clone of the batch cancellation token along with one identifier and
/// must be safe to call concurrently.
///
/// On the first failure no new fetches are started; already-started
/// fetches run to completion and their results are discarded. When
/// several fetches fail concurrently, which error surfaces is
/// unspecified. Once `cancel` fires, no new fetches start and in-flight
/// workers are raced against the token, so mid-flight abort is
/// best-effort.
///
/// An empty `ids` returns an empty vec without invoking `fetch` or
/// spawning any worker.
pub async fn fetch_all<I, T, E, F, Fut>(
    cancel: &CancellationToken,
    ids: Vec<I>,
    fetch: F,
    max_concurrency: usize,
) -> Result<Vec<T>, BatchError<E>>
where
    I: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    F: Fn(CancellationToken, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let max_concurrency = max_concurrency.max(1);
    let expected = ids.len();
    if expected == 0 {
        return Ok(Vec::new());
    }

    let fetch = Arc::new(fetch);
    let mut pending = ids.into_iter();
    let mut results = Vec::with_capacity(expected);
    let mut first_err: Option<BatchError<E>> = None;
    let mut join_set = JoinSet::new();

    loop {
        // Top up the in-flight set while a slot is free. Stops on the
        // first observed error or once cancellation is requested.
        while first_err.is_none() && !cancel.is_cancelled() && join_set.len() < max_concurrency {
            let Some(id) = pending.next() else { break };
            let fetch = Arc::clone(&fetch);
            let token = cancel.clone();
            join_set.spawn(async move {
                let fut = fetch(token.clone(), id);
                tokio::select! {
                    _ = token.cancelled() => Err(BatchError::Cancelled),
                    res = fut => res.map_err(BatchError::Fetch),
                }
            });
        }

        if join_set.is_empty() {
            break;
        }
        let Some(joined) = join_set.join_next().await else {
            break;
        };
        match joined {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            Err(join_err) => {
                if first_err.is_none() {
                    first_err = Some(BatchError::Task(join_err));
                }
            }
        }
    }

    if let Some(e) = first_err {
        return Err(e);
    }
    if results.len() < expected {
        // Cancellation stopped the batch before every fetch was scheduled.
        return Err(BatchError::Cancelled);
    }
    Ok(results)
}
