//! Final result mapping: one `(status_code, result_text)` pair per upload.
//!
//! The caller always receives a well-formed pair; the text names the
//! concrete reason for a failure, annotated with the attempt count when
//! more than one attempt ran. Failures with no HTTP response (pre-flight
//! rejection, connection errors on every attempt) use a sentinel status.

use crate::request::ValidationError;
use crate::retry::{AttemptError, RetryError};
use crate::transport::UploadResponse;

/// Sentinel status for failures that happened before any HTTP response.
pub const NO_RESPONSE: i64 = 0;

/// Normalized outcome of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub status_code: i64,
    pub text: String,
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Map a successful attempt to the final result.
pub fn success(resp: UploadResponse) -> UploadResult {
    UploadResult {
        status_code: resp.status as i64,
        text: resp.body,
    }
}

/// Map a pre-flight validation failure: sentinel status, concrete reason.
pub fn from_validation(err: &ValidationError) -> UploadResult {
    UploadResult {
        status_code: NO_RESPONSE,
        text: sanitize(&err.to_string()),
    }
}

/// Map the final failure of the retry loop.
pub fn from_retry(err: &RetryError) -> UploadResult {
    let (status_code, text) = match &err.error {
        AttemptError::Http { code, body } => {
            let text = if err.attempts > 1 {
                format!("HTTP {} after {} attempts: {}", code, err.attempts, body)
            } else {
                format!("HTTP {}: {}", code, body)
            };
            (*code as i64, text)
        }
        AttemptError::Curl(e) => {
            let text = if err.attempts > 1 {
                format!("{} after {} attempts", e, err.attempts)
            } else {
                e.to_string()
            };
            (NO_RESPONSE, text)
        }
        AttemptError::Rejected(reason) => (NO_RESPONSE, reason.clone()),
    };
    UploadResult {
        status_code,
        text: sanitize(&text),
    }
}

/// Patterns after which the rest of a line is considered a credential.
const SENSITIVE_PATTERNS: &[&str] = &[
    "authorization:",
    "bearer ",
    "x-api-key:",
    "api-key:",
    "token:",
    "password:",
    "secret:",
];

/// Redact credential-looking fragments from failure text so header values
/// never leak into results or logs.
fn sanitize(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let lower = line.to_ascii_lowercase();
        let cut = SENSITIVE_PATTERNS
            .iter()
            .filter_map(|p| lower.find(p))
            .min();
        match cut {
            Some(idx) => lines.push(format!("{}[redacted]", &line[..idx])),
            None => lines.push(line.to_string()),
        }
    }
    lines.join("\n")
}
