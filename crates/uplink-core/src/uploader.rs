//! Single-upload orchestration: validate, attempt with retry, report.
//!
//! The caller always receives a well-formed `UploadResult`; nothing in the
//! upload path panics or propagates an error past this boundary. Batch
//! uploads are a caller-side loop over this entry point.

use crate::failure_log;
use crate::report::{self, UploadResult};
use crate::request::UploadRequest;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::transport;

/// Upload one file with the default retry policy (3 attempts, 1s/2s backoff).
pub fn upload(req: &UploadRequest) -> UploadResult {
    upload_with_policy(req, &RetryPolicy::default())
}

/// Upload one file under an explicit retry policy.
pub fn upload_with_policy(req: &UploadRequest, policy: &RetryPolicy) -> UploadResult {
    tracing::info!(
        "uploading {} to {}",
        req.source_path.display(),
        req.destination
    );

    // Pre-flight: local conditions are checked once, never per attempt.
    let transport = match req.validate().and_then(|_| transport::select(req)) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("upload rejected: {}", e);
            log_failure(req);
            return report::from_validation(&e);
        }
    };

    match run_with_retry(policy, || transport.attempt()) {
        Ok(resp) => {
            tracing::info!(
                "uploaded {} (HTTP {})",
                req.source_path.display(),
                resp.status
            );
            report::success(resp)
        }
        Err(err) => {
            tracing::error!(
                "upload of {} failed after {} attempt(s): {}",
                req.source_path.display(),
                err.attempts,
                err.error
            );
            log_failure(req);
            report::from_retry(&err)
        }
    }
}

fn log_failure(req: &UploadRequest) {
    if let Some(log_file) = &req.log_file {
        failure_log::record_failure(log_file, &req.source_path);
    }
}
