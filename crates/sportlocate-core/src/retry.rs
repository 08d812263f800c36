//! Retry utilities for catalog and weather HTTP calls.
//!
//! Every remote call gets a fixed number of attempts with a fixed pause
//! between them. Which failures are worth another attempt is decided by the
//! error type through [`Retryable`]:
//! - transport failures (timeouts, refused or reset connections) retry
//! - non-2xx statuses retry
//! - a 2xx response whose body is not valid JSON retries too

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Default retry configuration
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Pause between two consecutive attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings
    pub fn new(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Attempts actually performed; a zero setting still makes one call.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Should retry the request
    Retry,
    /// Should not retry - permanent failure
    NoRetry,
}

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    fn retry_decision(&self) -> RetryDecision;
}

/// Run `operation` until it succeeds, fails permanently, or the attempt
/// budget is spent. The last error is returned on exhaustion.
///
/// # Example
/// ```ignore
/// let value = with_retry(&RetryConfig::default(), || client.fetch_once(url)).await?;
/// ```
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let attempts = config.effective_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Request succeeded on attempt {} of {}", attempt, attempts);
                }
                return Ok(value);
            }
            Err(e) => {
                if e.retry_decision() == RetryDecision::NoRetry {
                    tracing::debug!("Non-retryable error: {}", e);
                    return Err(e);
                }

                if attempt >= attempts {
                    tracing::error!("All {} attempts exhausted: {}", attempts, e);
                    return Err(e);
                }

                tracing::warn!(
                    "Retryable error on attempt {} of {}: {}, waiting {:?}",
                    attempt,
                    attempts,
                    e,
                    config.delay
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct FakeError(RetryDecision);

    impl Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fake error ({:?})", self.0)
        }
    }

    impl Retryable for FakeError {
        fn retry_decision(&self) -> RetryDecision {
            self.0
        }
    }

    fn fast() -> RetryConfig {
        RetryConfig::new(3, 1)
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_attempts_still_calls_once() {
        assert_eq!(RetryConfig::new(0, 10).effective_attempts(), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<u32, FakeError> = with_retry(&fast(), || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(FakeError(RetryDecision::Retry))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), FakeError> = with_retry(&fast(), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(FakeError(RetryDecision::Retry))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), FakeError> = with_retry(&fast(), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(FakeError(RetryDecision::NoRetry))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
