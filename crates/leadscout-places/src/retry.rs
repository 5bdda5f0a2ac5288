//! Retry utilities for the places clients.
//!
//! Provides exponential backoff retry logic for transient HTTP errors.
//! Non-retriable errors (parse failures, non-429 statuses) are propagated
//! immediately without retrying. With `max_retries = 0` every failure is a
//! one-shot skip, which is the default operating mode.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`PlacesError::Http`] — network-level failure (connection reset, timeout, etc.).
/// - [`PlacesError::HttpStatus`] with status 429 — the server has asked us to back off.
///
/// Non-retriable errors (propagated immediately):
/// - [`PlacesError::HttpStatus`] for any other status — retrying would return the same result.
/// - [`PlacesError::Deserialize`] — response body does not parse; retrying won't fix it.
fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(_) => true,
        PlacesError::HttpStatus { status, .. } => *status == 429,
        PlacesError::Deserialize { .. } => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for `backoff_base_secs * 2^attempt`
/// seconds and tries again, up to `max_retries` additional attempts after the
/// first try. If all retries are exhausted the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, capped to avoid overflow.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient places error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
