//! Error types for portscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Dial errors never leave
//! the scanner: they are retried or absorbed inside a connection attempt.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single dial can fail.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Connection timed out")]
    Timeout,

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Host unreachable")]
    HostUnreachable,

    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Failed to resolve {host}: {reason}")]
    Resolution { host: String, reason: String },

    #[error("Connection to {target}:{port} failed: {reason}")]
    ConnectionFailed {
        target: String,
        port: u16,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dial operations.
pub type DialResult<T> = Result<T, ScanError>;

/// Errors loading persistent settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory")]
    DirectoryNotFound,

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors writing a report.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
