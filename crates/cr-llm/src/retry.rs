use std::future::Future;
use std::time::Duration;

use cr_core::{ProviderConfig, Result};
use tracing::warn;

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Bounded retry with exponential backoff for transient provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.max_retries, config.retry_base_delay)
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or
    /// `max_retries` retries have been spent. `op` receives the 1-based
    /// attempt number.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt <= self.max_retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        label,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transient error: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
