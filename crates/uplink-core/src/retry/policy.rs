use std::time::Duration;

/// High-level classification of an attempt error for retry purposes.
///
/// Callers map HTTP status codes and curl errors into these kinds; only
/// transient network conditions and server errors are worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused/reset, DNS, etc.).
    Connection,
    /// HTTP server error (5xx).
    Http5xx(u16),
    /// Any other error: 4xx responses, pre-flight rejections. Not retried.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed, data-driven backoff schedule.
///
/// `delays[0]` is slept before attempt 2, `delays[1]` before attempt 3, and
/// so on; the maximum number of attempts is `delays.len() + 1`. The default
/// schedule is 1s then 2s, for 3 attempts total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay slept before each re-attempt, in order.
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![Duration::from_secs(1), Duration::from_secs(2)],
        }
    }
}

impl RetryPolicy {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Policy with the same number of attempts but zero delays, so tests can
    /// run the full attempt cycle without sleeping.
    pub fn no_delay(max_attempts: u32) -> Self {
        Self {
            delays: vec![Duration::ZERO; max_attempts.saturating_sub(1) as usize],
        }
    }

    /// Maximum number of attempts (including the first).
    pub fn max_attempts(&self) -> u32 {
        self.delays.len() as u32 + 1
    }

    /// Decide whether to retry after the given attempt failed with `kind`.
    ///
    /// `attempt` is 1-based (1 = first attempt). Terminal kinds are never
    /// retried; retryable kinds are retried until the schedule is exhausted.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http5xx(_) => {
                match self.delays.get(attempt.saturating_sub(1) as usize) {
                    Some(d) => RetryDecision::RetryAfter(*d),
                    None => RetryDecision::NoRetry,
                }
            }
        }
    }
}
