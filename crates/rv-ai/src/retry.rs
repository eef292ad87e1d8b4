//! Retry policy for provider calls

use std::future::Future;
use std::time::Duration;

use rv_core::config::AiConfig;
use rv_core::result::RvResult;
use tracing::warn;

/// Bounded attempts separated by an increasing delay ladder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay before attempt `n + 1`; the last entry repeats when short
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delays: Vec<Duration>) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delays,
        }
    }

    /// A single attempt, no waiting
    pub fn once() -> Self {
        Self::new(1, Vec::new())
    }

    pub fn from_config(config: &AiConfig) -> Self {
        let delays = config
            .retry_delays_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect();
        Self::new(config.max_attempts, delays)
    }

    /// Wait after the failed attempt with zero-based index `attempt`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.delays
            .get(attempt as usize)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Run `operation` until it succeeds or the attempts run out.
    ///
    /// Returns the last error when every attempt failed. There is no sleep
    /// after the final attempt.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> RvResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = RvResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 >= self.max_attempts => return Err(e),
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "AI request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
