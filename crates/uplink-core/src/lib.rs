pub mod config;
pub mod logging;

pub mod failure_log;
pub mod headers;
pub mod report;
pub mod request;
pub mod retry;
pub mod transport;
pub mod uploader;
