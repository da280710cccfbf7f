//! Bounded retry for asynchronous operations.
//!
//! The facade performs no automatic retries; callers opt in by wrapping an
//! operation in [`retry`] or [`retry_if`]. Retries are purely sequential —
//! no backoff is baked in. A caller wanting delay between attempts can
//! sleep inside the operation thunk or the predicate's surrounding logic.

use std::future::Future;

/// Retries `operation` until it succeeds or `retry_limit` retries have
/// been spent. With a limit of `N` the operation runs at most `N + 1`
/// times (one initial attempt plus `N` retries).
///
/// The error from the final failed attempt is returned as-is — the same
/// value, never wrapped — so callers can still match on it.
///
/// ```
/// use reaqta_hive::retry;
///
/// # #[tokio::main(flavor = "current_thread")] async fn main() {
/// let mut attempts = 0;
/// let result: Result<&str, &str> = retry(
///     || {
///         attempts += 1;
///         let outcome = if attempts < 3 { Err("flaky") } else { Ok("done") };
///         async move { outcome }
///     },
///     3,
/// )
/// .await;
/// assert_eq!(result, Ok("done"));
/// # }
/// ```
pub async fn retry<T, E, F, Fut>(operation: F, retry_limit: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_if(operation, retry_limit, |_| true).await
}

/// Like [`retry`], but consults `should_retry` with each error before
/// retrying. The attempt counter is advanced before the predicate runs, so
/// exhausting the limit wins over a permissive predicate.
///
/// Pairs naturally with [`crate::HiveError::is_retryable`]:
///
/// ```no_run
/// use reaqta_hive::{retry_if, HiveClient};
///
/// # async fn example(client: HiveClient) -> reaqta_hive::Result<()> {
/// let alert = retry_if(|| client.get_alert("830059572294057986"), 2, |err| err.is_retryable()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_if<T, E, F, Fut, P>(
    mut operation: F,
    retry_limit: u32,
    mut should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&E) -> bool,
{
    let mut attempts: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;
                if attempts > retry_limit || !should_retry(&err) {
                    return Err(err);
                }
            }
        }
    }
}
