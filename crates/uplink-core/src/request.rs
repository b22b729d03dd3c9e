//! Upload request model and pre-flight validation.
//!
//! An `UploadRequest` is constructed fresh per invocation and consumed by a
//! single call to the uploader; there is no cross-invocation state. Local
//! conditions (missing file, bad URL, missing credentials) are caught here
//! once, before any network attempt.

use crate::headers::Headers;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Fallback filename when the source path has no usable final component.
const DEFAULT_FILENAME: &str = "upload.bin";

/// Default per-attempt timeout for the generic HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default multipart form field name carrying the file.
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Pre-flight failure: a programmer/config error for which retrying cannot
/// help. No network call is made when validation fails.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("invalid method: {0} (expected POST or PUT)")]
    InvalidMethod(String),
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("API key and share ID are required")]
    MissingCredentials,
    #[error("upload field name is required")]
    EmptyFieldName,
}

/// HTTP method for the generic transport. Only POST and PUT are accepted;
/// anything else is rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            m if m.eq_ignore_ascii_case("post") => Ok(Method::Post),
            m if m.eq_ignore_ascii_case("put") => Ok(Method::Put),
            other => Err(ValidationError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
        }
    }
}

/// Where one upload goes, discriminated by transport kind.
#[derive(Debug, Clone)]
pub enum Destination {
    /// Filestash API: raw-body POST with query-parameter auth.
    Filestash {
        base_url: String,
        api_key: String,
        share_id: String,
        upload_path: String,
    },
    /// Generic endpoint: multipart POST or PUT.
    Http { url: String, method: Method },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Filestash { base_url, .. } => write!(f, "filestash {}", base_url),
            Destination::Http { url, method } => write!(f, "{} {}", method, url),
        }
    }
}

/// Normalized description of one transfer.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub source_path: PathBuf,
    pub destination: Destination,
    pub headers: Headers,
    /// Per-attempt timeout; generic transport only (Filestash is fixed).
    pub timeout: Duration,
    /// Multipart form field name; generic transport only.
    pub field_name: String,
    /// When set, a failure record is appended here on terminal failure.
    pub log_file: Option<PathBuf>,
}

impl UploadRequest {
    pub fn new(source_path: impl Into<PathBuf>, destination: Destination) -> Self {
        Self {
            source_path: source_path.into(),
            destination,
            headers: Headers::new(),
            timeout: DEFAULT_TIMEOUT,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            log_file: None,
        }
    }

    pub fn http(source_path: impl Into<PathBuf>, url: impl Into<String>, method: Method) -> Self {
        Self::new(
            source_path,
            Destination::Http {
                url: url.into(),
                method,
            },
        )
    }

    pub fn filestash(
        source_path: impl Into<PathBuf>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        share_id: impl Into<String>,
        upload_path: impl Into<String>,
    ) -> Self {
        Self::new(
            source_path,
            Destination::Filestash {
                base_url: base_url.into(),
                api_key: api_key.into(),
                share_id: share_id.into(),
                upload_path: upload_path.into(),
            },
        )
    }

    /// Upload filename: the final component of the source path.
    pub fn filename(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
    }

    /// Check local preconditions once, before any attempt is made.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match std::fs::metadata(&self.source_path) {
            Err(_) => {
                return Err(ValidationError::FileNotFound(
                    self.source_path.display().to_string(),
                ))
            }
            Ok(meta) if !meta.is_file() => {
                return Err(ValidationError::NotAFile(
                    self.source_path.display().to_string(),
                ))
            }
            Ok(_) => {}
        }

        match &self.destination {
            Destination::Http { url, .. } => {
                parse_url(url)?;
                if self.field_name.trim().is_empty() {
                    return Err(ValidationError::EmptyFieldName);
                }
            }
            Destination::Filestash {
                base_url,
                api_key,
                share_id,
                ..
            } => {
                parse_url(base_url)?;
                if api_key.is_empty() || share_id.is_empty() {
                    return Err(ValidationError::MissingCredentials);
                }
            }
        }
        Ok(())
    }
}

fn parse_url(url: &str) -> Result<Url, ValidationError> {
    Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Guess a content type from the file extension, falling back to a binary
/// default for unknown types.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn method_parse_accepts_case_insensitive_post_put() {
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("put".parse::<Method>().unwrap(), Method::Put);
        assert_eq!(" Put ".parse::<Method>().unwrap(), Method::Put);
    }

    #[test]
    fn method_parse_names_the_invalid_method() {
        let err = "PATCH".parse::<Method>().unwrap_err();
        assert_eq!(err.to_string(), "invalid method: PATCH (expected POST or PUT)");
    }

    #[test]
    fn validate_missing_file_names_path() {
        let req = UploadRequest::http("/tmp/missing.jpg", "http://example.com/upload", Method::Post);
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "file not found: /tmp/missing.jpg");
    }

    #[test]
    fn validate_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let req = UploadRequest::http(dir.path(), "http://example.com/upload", Method::Post);
        assert!(matches!(req.validate(), Err(ValidationError::NotAFile(_))));
    }

    #[test]
    fn validate_bad_url_rejected() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let req = UploadRequest::http(f.path(), "not a url", Method::Post);
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn validate_filestash_requires_credentials() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"x").unwrap();
        let req = UploadRequest::filestash(f.path(), "http://localhost:8334", "", "", "/uploads/");
        assert!(matches!(
            req.validate(),
            Err(ValidationError::MissingCredentials)
        ));
    }

    #[test]
    fn filename_is_final_path_component() {
        let req = UploadRequest::http("/tmp/out/a.jpg", "http://example.com", Method::Post);
        assert_eq!(req.filename(), "a.jpg");
    }

    #[test]
    fn content_type_guessed_from_extension() {
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("a.xyz")), "application/octet-stream");
    }
}
