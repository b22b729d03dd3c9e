mod filestash;
mod send;

pub use filestash::run_filestash;
pub use send::run_send;

use anyhow::{Context, Result};
use std::path::Path;
use uplink_core::headers::{self, Headers};
use uplink_core::report::UploadResult;

/// Print the two-value result contract.
pub(crate) fn print_result(result: &UploadResult) {
    println!("status_code: {}", result.status_code);
    println!("result_text: {}", result.text);
}

/// Collect headers from a headers file, repeatable `--header` flags, and an
/// optional secret headers file; later sources win on conflict.
pub(crate) fn collect_headers(
    headers_file: Option<&Path>,
    inline: &[String],
    secret_file: Option<&Path>,
) -> Result<Headers> {
    let mut collected = Headers::new();
    if let Some(path) = headers_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read headers file {}", path.display()))?;
        collected.merge(&Headers::parse(&text));
    }
    for entry in inline {
        collected.merge(&Headers::parse(entry));
    }
    if let Some(path) = secret_file {
        collected.merge(&headers::load_secret_headers(path)?);
    }
    Ok(collected)
}
