//! Failure log: one appended line per terminally failed upload.
//!
//! Best-effort side effect. Writing must never disturb the returned result,
//! so all errors here are swallowed after a warning. Each line is
//! self-contained; concurrent writers may interleave at line granularity.

use chrono::{SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append a timestamped failure record for `source` to `log_file`, creating
/// missing parent directories first.
pub fn record_failure(log_file: &Path, source: &Path) {
    if let Err(e) = append_record(log_file, source) {
        tracing::warn!(
            "could not write failure log {}: {}",
            log_file.display(),
            e
        );
    }
}

fn append_record(log_file: &Path, source: &Path) -> std::io::Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let line = format!("{} upload failed: {}\n", stamp, source.display());
    let mut f = OpenOptions::new().create(true).append(true).open(log_file)?;
    f.write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_dirs_and_appends_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs").join("failures.log");
        record_failure(&log, Path::new("/tmp/a.jpg"));

        let content = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("upload failed: /tmp/a.jpg"));
    }

    #[test]
    fn successive_failures_append() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("failures.log");
        record_failure(&log, Path::new("/tmp/a.jpg"));
        record_failure(&log, Path::new("/tmp/b.jpg"));

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn unwritable_target_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // The log path is an existing directory; the open fails but must not panic.
        record_failure(dir.path(), Path::new("/tmp/a.jpg"));
    }
}
