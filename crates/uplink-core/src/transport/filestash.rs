//! Filestash transport: raw-body POST to `/api/files/cat` with
//! query-parameter auth (`path`, `key`, `share`).

use super::{apply_headers, response_outcome, Transport, UploadResponse, CONNECT_TIMEOUT};
use crate::headers::Headers;
use crate::request::{UploadRequest, ValidationError};
use crate::retry::AttemptError;
use curl::easy::{Easy, ReadError};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Per-attempt timeout; the Filestash transport does not honor the request
/// timeout and always uses this fixed value.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Destination path on the server: upload path joined with the filename.
pub fn dest_path(upload_path: &str, filename: &str) -> String {
    format!("{}/{}", upload_path.trim_end_matches('/'), filename)
}

pub struct FilestashTransport {
    endpoint: Url,
    source: PathBuf,
    headers: Headers,
}

impl FilestashTransport {
    /// Resolve the API endpoint with its three query parameters. Extra
    /// headers are carried separately and cannot override them.
    pub fn new(
        req: &UploadRequest,
        base_url: &str,
        api_key: &str,
        share_id: &str,
        upload_path: &str,
    ) -> Result<Self, ValidationError> {
        let api = format!("{}/api/files/cat", base_url.trim_end_matches('/'));
        let mut endpoint = Url::parse(&api).map_err(|e| ValidationError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        endpoint
            .query_pairs_mut()
            .append_pair("path", &dest_path(upload_path, &req.filename()))
            .append_pair("key", api_key)
            .append_pair("share", share_id);

        Ok(Self {
            endpoint,
            source: req.source_path.clone(),
            headers: req.headers.clone(),
        })
    }
}

impl Transport for FilestashTransport {
    fn attempt(&self) -> Result<UploadResponse, AttemptError> {
        let mut file = File::open(&self.source).map_err(|e| {
            AttemptError::Rejected(format!("cannot open {}: {}", self.source.display(), e))
        })?;
        let size = file
            .metadata()
            .map_err(|e| {
                AttemptError::Rejected(format!("cannot stat {}: {}", self.source.display(), e))
            })?
            .len();

        let mut easy = Easy::new();
        easy.url(self.endpoint.as_str())?;
        easy.post(true)?;
        easy.post_field_size(size)?;
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        easy.timeout(ATTEMPT_TIMEOUT)?;
        apply_headers(&mut easy, &self.headers)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.read_function(move |buf| file.read(buf).map_err(|_| ReadError::Abort))?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        response_outcome(code, body)
    }
}
