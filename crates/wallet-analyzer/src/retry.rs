//! Bounded retry with exponential backoff.
//!
//! A single explicit policy (attempt count, backoff schedule) applied to
//! every retried unit of work, so retry behavior is testable under tokio's
//! paused clock rather than wall-clock sleeps.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry.
    pub base_delay: Duration,
    /// Ceiling on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Backoff before the retry following attempt `attempt` (0-based):
    /// `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `op` until it succeeds or the attempt budget is exhausted, in
    /// which case the final error is returned to the caller of this one
    /// unit of work.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt >= attempts {
                        return Err(err);
                    }

                    let delay = self.backoff_delay(attempt - 1);
                    warn!(
                        attempt = attempt,
                        max_attempts = attempts,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "Retryable failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
