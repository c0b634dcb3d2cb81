use std::fmt::Display;
use std::future::Future;

use crate::config::RetryPolicy;

/// Run `call` until it succeeds or the policy's attempts are used up
///
/// After the failed attempt with zero-based index `i` the wrapper sleeps
/// `base_delay * 2^i`; there is no sleep after the final attempt. The last
/// error is returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match call().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(op = operation, attempt = attempt + 1, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                if attempt + 1 >= max_attempts {
                    tracing::warn!(
                        op = operation,
                        attempts = max_attempts,
                        error = %e,
                        "Giving up after final attempt"
                    );
                    return Err(e);
                }

                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    op = operation,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<&str, String> = retry_with_backoff(&policy(), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(format!("failure {}", n))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1000ms after the first failure, 2000ms after the second
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_returns_last_error() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), String> = retry_with_backoff(&policy(), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("failure {}", n)) }
        })
        .await;

        assert_eq!(result, Err("failure 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // No wait after the final attempt
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_does_not_sleep() {
        let started = Instant::now();

        let result: Result<u8, String> =
            retry_with_backoff(&policy(), "test", || async { Ok(7) }).await;

        assert_eq!(result, Ok(7));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_respects_configured_attempts() {
        let calls = AtomicU32::new(0);
        let single = RetryPolicy {
            max_attempts: 1,
            base_delay: Duration::from_millis(1000),
        };

        let result: Result<(), &str> = retry_with_backoff(&single, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("nope") }
        })
        .await;

        tokio_test::assert_err!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
