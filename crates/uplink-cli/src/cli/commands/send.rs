//! `uplink send <file> --url <url>` – upload one file to a generic endpoint.

use super::{collect_headers, print_result};
use crate::cli::SendArgs;
use anyhow::Result;
use std::time::Duration;
use uplink_core::config::UplinkConfig;
use uplink_core::report;
use uplink_core::request::{Method, UploadRequest};
use uplink_core::retry::RetryPolicy;
use uplink_core::uploader;

pub fn run_send(args: SendArgs, cfg: &UplinkConfig, policy: &RetryPolicy) -> Result<()> {
    // An unknown method is a terminal result, not a CLI usage error: the
    // caller still gets the (status_code, result_text) pair.
    let method = match args.method.parse::<Method>() {
        Ok(m) => m,
        Err(err) => {
            print_result(&report::from_validation(&err));
            anyhow::bail!("upload failed");
        }
    };

    let headers = collect_headers(
        args.headers_file.as_deref(),
        &args.headers,
        args.secret_headers_file.as_deref(),
    )?;

    let mut req = UploadRequest::http(args.file, args.url, method);
    req.headers = headers;
    req.timeout = Duration::from_secs(args.timeout.unwrap_or(cfg.timeout_secs));
    req.field_name = args.field_name.unwrap_or_else(|| cfg.field_name.clone());
    req.log_file = args.log_file;

    let result = uploader::upload_with_policy(&req, policy);
    print_result(&result);
    if !result.is_success() {
        anyhow::bail!("upload failed");
    }
    Ok(())
}
