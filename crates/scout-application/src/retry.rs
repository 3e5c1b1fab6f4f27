//! Bounded fixed-delay retry execution.

use std::future::Future;
use std::time::Duration;

use scout_core::config::ClientConfig;
use scout_core::{Result, ScoutError};

/// A reusable bounded-retry executor for asynchronous operations.
///
/// Attempts run sequentially, never in parallel, with a fixed cooperative
/// delay between them (the calling flow is suspended, not blocked). After
/// the attempt budget is exhausted the last error is returned wrapped in
/// `RetryExhausted`. The policy is agnostic to what it retries; every
/// remote write shares this one implementation so the behavior stays
/// consistent and testable under a fake clock.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    /// Three attempts, one second apart.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and inter-attempt
    /// delay. The budget is clamped to at least one attempt.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Creates a policy from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.retry_max_attempts, config.retry_delay())
    }

    /// The configured attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Invokes `op` until it succeeds or the attempt budget runs out.
    ///
    /// `op` is called once per attempt and must produce a fresh future
    /// each time.
    ///
    /// # Errors
    ///
    /// Fails with `RetryExhausted` wrapping the error of the final
    /// attempt.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last = None;
        for attempt in 1..=self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(
                        "Attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    last = Some(e);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        // max_attempts >= 1, so at least one attempt populated `last`
        let last = last.unwrap_or_else(|| ScoutError::network("no attempts were made"));
        Err(ScoutError::retry_exhausted(self.max_attempts, last))
    }
}
