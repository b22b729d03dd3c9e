//! Retry and backoff policy.
//!
//! This module encapsulates error classification (timeouts, connection
//! failures, server errors) and the fixed backoff schedule so that the
//! uploader and both transports share a consistent policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::AttemptError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryError};
