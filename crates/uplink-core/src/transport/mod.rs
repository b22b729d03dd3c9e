//! Transports: translate an upload request into single HTTP attempts.
//!
//! Each transport owns everything one attempt needs (resolved URL, headers,
//! source path) and exposes the one capability the retry engine runs. All
//! network and protocol failures are converted into `AttemptError` here;
//! nothing escapes an attempt as an unhandled fault.

mod filestash;
mod http;

pub use filestash::{dest_path, FilestashTransport};
pub use http::HttpTransport;

use crate::headers::Headers;
use crate::request::{Destination, UploadRequest, ValidationError};
use crate::retry::AttemptError;
use curl::easy::{Easy, List};
use std::time::Duration;

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Successful (2xx) response from one attempt.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    pub status: u32,
    pub body: String,
}

/// One HTTP attempt for a specific destination kind.
pub trait Transport {
    fn attempt(&self) -> Result<UploadResponse, AttemptError>;
}

/// Build the transport for a request's destination.
pub fn select(req: &UploadRequest) -> Result<Box<dyn Transport>, ValidationError> {
    match &req.destination {
        Destination::Filestash {
            base_url,
            api_key,
            share_id,
            upload_path,
        } => Ok(Box::new(FilestashTransport::new(
            req,
            base_url,
            api_key,
            share_id,
            upload_path,
        )?)),
        Destination::Http { url, method } => {
            Ok(Box::new(HttpTransport::new(req, url, *method)?))
        }
    }
}

/// Apply custom headers to a curl handle.
pub(crate) fn apply_headers(easy: &mut Easy, headers: &Headers) -> Result<(), curl::Error> {
    if headers.is_empty() {
        return Ok(());
    }
    let mut list = List::new();
    for (name, value) in headers.iter() {
        list.append(&format!("{}: {}", name.trim(), value.trim()))?;
    }
    easy.http_headers(list)
}

/// Map a completed transfer to success (2xx) or a classifiable HTTP error.
pub(crate) fn response_outcome(
    code: u32,
    body: Vec<u8>,
) -> Result<UploadResponse, AttemptError> {
    let body = String::from_utf8_lossy(&body).into_owned();
    if (200..300).contains(&code) {
        Ok(UploadResponse { status: code, body })
    } else {
        Err(AttemptError::Http { code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_2xx_is_success() {
        let resp = response_outcome(201, b"created".to_vec()).unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body, "created");
    }

    #[test]
    fn outcome_non_2xx_is_http_error_with_body() {
        let err = response_outcome(503, b"busy".to_vec()).unwrap_err();
        match err {
            AttemptError::Http { code, body } => {
                assert_eq!(code, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }
}
