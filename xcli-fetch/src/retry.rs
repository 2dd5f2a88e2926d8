//! Backoff policy for rate-limited requests.

use std::time::Duration;

use crate::error::RateLimitSignal;

/// Seconds added to the reset time before retrying.
const RESET_BUFFER_SECS: u64 = 5;

/// Wait used when the reset time is missing or unparseable.
const FALLBACK_WAIT_SECS: u64 = 60;

/// Computes how long to wait after a 429.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitBackoff {
    /// Added on top of the time remaining until reset.
    pub buffer: Duration,
    /// Used when the reset time is unknown.
    pub fallback: Duration,
}

impl RateLimitBackoff {
    /// Creates the default policy (reset + 5s, or 60s).
    pub fn new() -> Self {
        Self {
            buffer: Duration::from_secs(RESET_BUFFER_SECS),
            fallback: Duration::from_secs(FALLBACK_WAIT_SECS),
        }
    }

    /// Sets the fallback wait.
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the wait for `signal` given the current Unix time.
    ///
    /// A reset time already in the past waits for the buffer only.
    pub fn wait_for(&self, signal: &RateLimitSignal, now_unix: i64) -> Duration {
        match signal.reset_timestamp() {
            Some(reset) => {
                let remaining = u64::try_from(reset.saturating_sub(now_unix)).unwrap_or(0);
                Duration::from_secs(remaining) + self.buffer
            }
            None => self.fallback,
        }
    }
}

impl Default for RateLimitBackoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_wait_until_reset_plus_buffer() {
        let backoff = RateLimitBackoff::default();
        let signal = RateLimitSignal::new(Some("1700000030"));
        assert_eq!(backoff.wait_for(&signal, NOW), Duration::from_secs(35));
    }

    #[test]
    fn test_unparseable_reset_waits_fallback() {
        let backoff = RateLimitBackoff::default();
        assert_eq!(
            backoff.wait_for(&RateLimitSignal::new(Some("unknown")), NOW),
            Duration::from_secs(60)
        );
        assert_eq!(
            backoff.wait_for(&RateLimitSignal::new(None), NOW),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_past_reset_waits_buffer_only() {
        let backoff = RateLimitBackoff::default();
        let signal = RateLimitSignal::new(Some("1699999000"));
        assert_eq!(backoff.wait_for(&signal, NOW), Duration::from_secs(5));
    }

    #[test]
    fn test_custom_fallback() {
        let backoff = RateLimitBackoff::new().with_fallback(Duration::from_secs(15));
        assert_eq!(
            backoff.wait_for(&RateLimitSignal::new(None), NOW),
            Duration::from_secs(15)
        );
    }
}
