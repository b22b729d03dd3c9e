//! Generic HTTP transport: multipart POST/PUT of one file to any endpoint.

use super::{apply_headers, response_outcome, Transport, UploadResponse, CONNECT_TIMEOUT};
use crate::headers::Headers;
use crate::request::{content_type_for, Method, UploadRequest, ValidationError};
use crate::retry::AttemptError;
use curl::easy::{Easy, Form};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub struct HttpTransport {
    url: Url,
    method: Method,
    source: PathBuf,
    filename: String,
    content_type: &'static str,
    field_name: String,
    headers: Headers,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(req: &UploadRequest, url: &str, method: Method) -> Result<Self, ValidationError> {
        let url = Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            url,
            method,
            source: req.source_path.clone(),
            filename: req.filename(),
            content_type: content_type_for(&req.source_path),
            field_name: req.field_name.clone(),
            headers: req.headers.clone(),
            timeout: req.timeout,
        })
    }
}

impl Transport for HttpTransport {
    fn attempt(&self) -> Result<UploadResponse, AttemptError> {
        let mut form = Form::new();
        form.part(&self.field_name)
            .file(&self.source)
            .filename(self.filename.as_str())
            .content_type(self.content_type)
            .add()
            .map_err(|e| AttemptError::Rejected(format!("multipart form: {}", e)))?;

        let mut easy = Easy::new();
        easy.url(self.url.as_str())?;
        easy.httppost(form)?;
        // libcurl's form API issues POST; PUT keeps the multipart body but
        // overrides the request line.
        if self.method == Method::Put {
            easy.custom_request("PUT")?;
        }
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        easy.timeout(self.timeout)?;
        apply_headers(&mut easy, &self.headers)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
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
