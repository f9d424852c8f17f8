//! Retry configuration for a single destination.

use std::time::Duration;

/// `{ maxRetries, retryInterval }` from a destination's `retryConfig`.
///
/// The wrapper's contract is deliberately narrow: a fixed number of extra
/// attempts, a fixed sleep between them. No exponential backoff, no retry
/// budget, no per-request attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub(crate) max_retries: u32,
    pub(crate) retry_interval: Duration,
}

impl RetryConfig {
    /// `max_retries` additional attempts after the first, sleeping
    /// `retry_interval` between attempts (never after the last).
    pub fn new(max_retries: u32, retry_interval: Duration) -> Self {
        Self {
            max_retries,
            retry_interval,
        }
    }

    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Total attempts a call under this config may make: `1 + max_retries`.
    pub fn total_attempts(&self) -> u32 {
        1 + self.max_retries
    }
}

/// Builder for [`RetryConfig`].
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    max_retries: Option<u32>,
    retry_interval: Option<Duration>,
}

impl RetryConfigBuilder {
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = Some(retry_interval);
        self
    }

    pub fn build(self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries.unwrap_or(0),
            retry_interval: self.retry_interval.unwrap_or(Duration::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_attempts_is_one_plus_max_retries() {
        let config = RetryConfig::new(2, Duration::from_millis(10));
        assert_eq!(config.total_attempts(), 3);
    }

    #[test]
    fn builder_defaults_to_no_retries() {
        let config = RetryConfig::builder().build();
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.retry_interval(), Duration::ZERO);
    }

    #[test]
    fn builder_sets_fields() {
        let config = RetryConfig::builder()
            .max_retries(5)
            .retry_interval(Duration::from_secs(2))
            .build();
        assert_eq!(config.max_retries(), 5);
        assert_eq!(config.retry_interval(), Duration::from_secs(2));
    }
}
