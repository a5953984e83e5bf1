//! Backoff policy for rate-limited (HTTP 429) tracker responses.

use std::time::Duration;

use crate::shared::config::Tuning;

/// Configuration for 429 retry behavior.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied per attempt (base * factor^attempt).
    pub backoff_factor: f64,
    /// Hard ceiling on any single wait.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            max_retries: tuning.max_retries,
            base_delay: Duration::from_secs_f64(tuning.backoff_base_secs.max(0.0)),
            backoff_factor: tuning.backoff_factor,
            max_delay: Duration::from_secs(tuning.max_backoff_secs),
        }
    }

    /// Delay before retrying after the given attempt (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_factor.powi(attempt as i32);
        let delay =
            Duration::from_secs_f64((self.base_delay.as_secs_f64() * multiplier).max(0.0));
        delay.min(self.max_delay)
    }
}
