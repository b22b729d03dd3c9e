//! Ordered HTTP header collection and normalization.
//!
//! Headers arrive from callers either as a JSON object or as raw multiline
//! `Name: value` text. Both forms are normalized here into one ordered
//! mapping so the transports never see malformed input: insertion order is
//! preserved, duplicate names overwrite in place, and unparseable lines are
//! skipped rather than treated as errors.

use anyhow::{Context, Result};
use std::path::Path;

/// Ordered header name/value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header. A duplicate name overwrites the earlier value but keeps
    /// its original position in the ordering.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((name.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Merge `other` into `self`; entries from `other` win on conflict.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse headers from raw text: a JSON object (`{"Name": "value"}`) or
    /// multiline `Name: value` lines.
    ///
    /// In the line form, blank lines and lines without a colon are ignored,
    /// as are lines with an empty name or value. Text that looks like JSON
    /// but fails to parse falls back to line parsing.
    pub fn parse(text: &str) -> Headers {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Headers::new();
        }

        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            if let Some(headers) = parse_json_object(trimmed) {
                return headers;
            }
        }

        let mut headers = Headers::new();
        for line in trimmed.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            headers.set(name, value);
        }
        headers
    }
}

fn parse_json_object(text: &str) -> Option<Headers> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    let mut headers = Headers::new();
    for (name, value) in object {
        let rendered = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        headers.set(name, &rendered);
    }
    Some(headers)
}

/// Load secret headers from a JSON object file.
///
/// Errors name the path but never echo file contents, so a misconfigured
/// credentials file cannot leak into a result message.
pub fn load_secret_headers(path: &Path) -> Result<Headers> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read secret headers file {}", path.display()))?;
    let trimmed = data.trim();
    parse_json_object(trimmed)
        .with_context(|| format!("secret headers file {} is not a JSON object", path.display()))
}
