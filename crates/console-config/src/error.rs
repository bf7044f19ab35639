//! Configuration store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration store operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised by a [`SelectionStore`](crate::SelectionStore).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The backing file could not be written.
    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON document.
    #[error("invalid JSON in config file {}: {source}", .path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A key path was empty or had an empty segment.
    #[error("invalid config key path: '{0}'")]
    InvalidPath(String),

    /// The platform has no configuration directory.
    #[error("no configuration directory found for this platform")]
    NoConfigDir,
}
