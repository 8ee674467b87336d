//! Retry with exponential backoff.
//!
//! # Design Decisions
//! - Every failure is retryable; providers are expected to be idempotent
//! - Jittered backoff avoids lockstep retries from repeated navigations
//! - The last error is returned unchanged

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::PageError;

/// Delay before retry number `retry` (1-based), capped at `max_ms` plus up to
/// 10% jitter.
pub fn backoff_delay(retry: u32, base_ms: u64, max_ms: u64) -> Duration {
    if retry == 0 {
        return Duration::ZERO;
    }
    let factor = 1u64.checked_shl(retry - 1).unwrap_or(u64::MAX);
    let capped = base_ms.saturating_mul(factor).min(max_ms);
    let jitter = match capped / 10 {
        0 => 0,
        range => rand::thread_rng().gen_range(0..range),
    };
    Duration::from_millis(capped + jitter)
}

/// Run `op` up to `max_attempts` times, sleeping between failed attempts.
pub async fn with_retries<F, Fut>(
    max_attempts: u32,
    base_ms: u64,
    max_ms: u64,
    mut op: F,
) -> Result<String, PageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, PageError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(content) => return Ok(content),
            Err(e) if attempt < max_attempts => {
                let delay = backoff_delay(attempt, base_ms, max_ms);
                tracing::debug!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Render failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backoff_calculation() {
        assert_eq!(backoff_delay(0, 100, 2000), Duration::ZERO);

        let first = backoff_delay(1, 100, 2000).as_millis();
        assert!((100..110).contains(&first));

        let second = backoff_delay(2, 100, 2000).as_millis();
        assert!((200..220).contains(&second));

        let capped = backoff_delay(40, 100, 1000).as_millis();
        assert!((1000..1100).contains(&capped));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retries(3, 1, 5, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(PageError::new("flaky"))
                } else {
                    Ok("<p>third time</p>".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "<p>third time</p>");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_returns_first_error() {
        let calls = AtomicU32::new(0);
        let result = with_retries(1, 1, 5, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<String, _>(PageError::new("boom")) }
        })
        .await;

        assert_eq!(result.unwrap_err().message(), "boom");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
