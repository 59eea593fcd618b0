//! Retry policy for connection-level failures.

use std::time::Duration;

/// Bounded retry policy applied when no HTTP response could be obtained.
///
/// Received responses are never retried, whatever their status. Delays
/// double after each failed attempt, starting at `base_delay` and capped at
/// `max_delay`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use harbor_api::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(1), Duration::from_millis(100));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(200));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Default total number of attempts (initial try + retries).
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    /// Default delay before the first retry.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);
    /// Default upper bound for a single delay.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

    /// Creates a policy. `max_attempts` is clamped to at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Returns the total number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay to wait before retry number `retry` (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Self::DEFAULT_BASE_DELAY,
            Self::DEFAULT_MAX_DELAY,
        )
    }
}
