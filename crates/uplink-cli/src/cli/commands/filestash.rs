//! `uplink filestash <files>...` – upload to a Filestash server.
//!
//! A single file prints the plain result pair; multiple files run the
//! legacy batch form, one summary line per file, continuing past failures.

use super::{collect_headers, print_result};
use crate::cli::FilestashArgs;
use anyhow::Result;
use std::path::Path;
use uplink_core::report::UploadResult;
use uplink_core::request::UploadRequest;
use uplink_core::retry::RetryPolicy;
use uplink_core::transport::dest_path;
use uplink_core::uploader;

pub fn run_filestash(args: FilestashArgs, policy: &RetryPolicy) -> Result<()> {
    let headers = collect_headers(None, &args.headers, None)?;
    let batch = args.files.len() > 1;
    let mut failures = 0usize;

    for file in &args.files {
        let mut req = UploadRequest::filestash(
            file,
            args.base_url.clone(),
            args.api_key.clone(),
            args.share_id.clone(),
            args.upload_path.clone(),
        );
        req.headers = headers.clone();
        req.log_file = args.log_file.clone();

        let result = uploader::upload_with_policy(&req, policy);
        if !result.is_success() {
            failures += 1;
        }
        if batch {
            println!("{}", summary_line(file, &args.upload_path, &result));
        } else {
            print_result(&result);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} upload(s) failed", failures, args.files.len());
    }
    Ok(())
}

/// One batch summary line per file, in the legacy format.
fn summary_line(file: &Path, upload_path: &str, result: &UploadResult) -> String {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    if result.is_success() {
        format!(
            "SUCCESS: Uploaded {} to {}",
            filename,
            dest_path(upload_path, &filename)
        )
    } else {
        format!("ERROR: Failed to upload {} - {}", file.display(), result.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_success_names_destination() {
        let result = UploadResult {
            status_code: 200,
            text: "ok".into(),
        };
        assert_eq!(
            summary_line(Path::new("/tmp/a.jpg"), "/uploads/", &result),
            "SUCCESS: Uploaded a.jpg to /uploads/a.jpg"
        );
    }

    #[test]
    fn summary_line_failure_names_reason() {
        let result = UploadResult {
            status_code: 0,
            text: "file not found: /tmp/a.jpg".into(),
        };
        assert_eq!(
            summary_line(Path::new("/tmp/a.jpg"), "/uploads/", &result),
            "ERROR: Failed to upload /tmp/a.jpg - file not found: /tmp/a.jpg"
        );
    }
}
