//! Retry loop: run an attempt closure until success or policy says stop.

use super::classify;
use super::error::AttemptError;
use super::policy::{RetryDecision, RetryPolicy};

/// Final failure of a retried operation: the last attempt's error, preserved
/// verbatim, plus how many attempts were made in total.
#[derive(Debug)]
pub struct RetryError {
    pub error: AttemptError,
    pub attempts: u32,
}

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the scheduled backoff then tries again;
/// terminal failures abort immediately without consuming remaining attempts.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, RetryError>
where
    F: FnMut() -> Result<T, AttemptError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(RetryError { error: e, attempts: attempt });
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(
                            "attempt {}/{} failed ({}), retrying in {:?}",
                            attempt,
                            policy.max_attempts(),
                            e,
                            d
                        );
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
