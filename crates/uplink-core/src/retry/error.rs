//! Attempt error type for retry classification.

use std::fmt;

/// Error returned by a single upload attempt (curl failure, HTTP error, or
/// attempt-time rejection). Kept structured so the policy can classify it and
/// the reporter can name the concrete reason.
#[derive(Debug)]
pub enum AttemptError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status. The body is kept for reporting.
    Http { code: u32, body: String },
    /// The attempt could not be made at all (e.g. source file unreadable,
    /// form construction failed). Never retried.
    Rejected(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Curl(e) => write!(f, "{}", e),
            AttemptError::Http { code, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {}", code)
                } else {
                    write!(f, "HTTP {}: {}", code, body)
                }
            }
            AttemptError::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Curl(e) => Some(e),
            AttemptError::Http { .. } | AttemptError::Rejected(_) => None,
        }
    }
}

impl From<curl::Error> for AttemptError {
    fn from(e: curl::Error) -> Self {
        AttemptError::Curl(e)
    }
}
