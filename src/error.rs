//! Error types for strato
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Control-plane API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The session token was rejected by the control plane
    #[error("Unauthorized. Use `strato login` to log in to StratoDB Cloud")]
    Unauthorized,

    /// The control plane answered with a non-success status code
    #[error("Query failed with status {status}")]
    Status { status: u16 },

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The session token is not a valid header value
    #[error("Invalid session token")]
    InvalidToken,
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No user configuration directory could be determined
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    /// Failed to read the config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse the config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Failed to write the config file
    #[error("Failed to write config file '{path}': {error}")]
    WriteError { path: PathBuf, error: String },
}
