//! Retry with exponential backoff for transient upstream failures.
//!
//! Storefronts throttle aggressively (HTTP 429) and shared hosting
//! returns transient 5xx under load; both are worth a short backoff and
//! another attempt. Anything that would fail identically on retry —
//! 404s, other 4xx, unparseable bodies — is propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Whether `err` is a transient condition worth retrying after a delay.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => (500..=599).contains(status),
        _ => false,
    }
}

/// Runs `operation`, retrying transient errors up to `max_retries`
/// additional attempts after the first try.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)`
/// seconds, except that a 429's `Retry-After` value takes precedence
/// when it is longer — the server's own estimate beats ours.
///
/// Non-retriable errors return immediately without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let backoff_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        let delay_secs = match &err {
            ScraperError::RateLimited {
                retry_after_secs, ..
            } => backoff_secs.max(*retry_after_secs),
            _ => backoff_secs,
        };

        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error; retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
