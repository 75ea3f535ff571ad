//! Bounded retry loop for page fetches.
//!
//! Two failure classes with asymmetric backoff:
//! - transport failures (connection errors, timeouts, non-2xx statuses)
//!   pause for a fixed delay before the next attempt;
//! - failures while handling an otherwise-delivered response retry
//!   immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` is a transport-level failure that should pause
/// before the next attempt.
fn is_transport(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
    )
}

/// Runs `operation` up to `max_attempts` times and returns the first success
/// or the last error once attempts run out.
///
/// Transport failures sleep `backoff` before the next attempt; any other
/// failure retries without pausing.
pub(crate) async fn retry_fetch<T, F, Fut>(
    max_attempts: u32,
    backoff: Duration,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(err);
                }
                if is_transport(&err) {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "transport failure, backing off before retry"
                    );
                    tokio::time::sleep(backoff).await;
                } else {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "fetch attempt failed, retrying"
                    );
                }
            }
        }
    }
}
