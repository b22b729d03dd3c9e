//! CLI for the UPLINK uploader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uplink_core::config;

use commands::{run_filestash, run_send};

/// Top-level CLI for the UPLINK uploader.
#[derive(Debug, Parser)]
#[command(name = "uplink")]
#[command(about = "UPLINK: single-file HTTP uploader with retry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload one file to a generic HTTP endpoint as multipart form data.
    Send(SendArgs),

    /// Upload files to a Filestash server; multiple files run as a batch.
    Filestash(FilestashArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Local file to upload.
    pub file: PathBuf,

    /// Target URL.
    #[arg(long)]
    pub url: String,

    /// HTTP method: post or put.
    #[arg(long, default_value = "post")]
    pub method: String,

    /// Extra header as `Name: value`; repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// File with headers: multiline `Name: value` lines or a JSON object.
    #[arg(long, value_name = "PATH")]
    pub headers_file: Option<PathBuf>,

    /// JSON object file with secret headers, merged over the others.
    #[arg(long, value_name = "PATH")]
    pub secret_headers_file: Option<PathBuf>,

    /// Multipart form field name for the file part.
    #[arg(long, value_name = "NAME")]
    pub field_name: Option<String>,

    /// Per-attempt timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append a failure record here when the upload terminally fails.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FilestashArgs {
    /// Local files to upload.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Base URL of the Filestash instance.
    #[arg(long)]
    pub base_url: String,

    /// API key for authentication.
    #[arg(long)]
    pub api_key: String,

    /// Share ID for the upload location.
    #[arg(long)]
    pub share_id: String,

    /// Destination directory on the server.
    #[arg(long, default_value = "/uploads/")]
    pub upload_path: String,

    /// Extra header as `Name: value`; repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Append a failure record here for each terminally failed file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let policy = cfg.retry_policy();

        match cli.command {
            CliCommand::Send(args) => run_send(args, &cfg, &policy),
            CliCommand::Filestash(args) => run_filestash(args, &policy),
        }
    }
}

#[cfg(test)]
mod tests;
