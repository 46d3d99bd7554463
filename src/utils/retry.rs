use std::future::Future;
use tracing::info;
use crate::utils::time::backoff_delay;

/// Retries used when the caller does not pick a budget.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Runs `operation` until it succeeds or `max_retries` retries have failed.
///
/// The operation is invoked at most `max_retries + 1` times. Between attempts the
/// task sleeps for [`backoff_delay`] of the failed attempt and emits one info notice.
/// The error of the final attempt is returned untouched.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_retries: u32,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_retries => return Err(e),
            Err(_) => {
                let delay = backoff_delay(attempt);
                info!(
                    "Attempt {}/{} failed, retrying in {:.1}s...",
                    attempt + 1,
                    max_retries.saturating_add(1),
                    delay.as_secs_f64()
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
