//! Error types for the console-tenancy crate.

use console_config::ConfigError;
use thiserror::Error;

use crate::level::Level;

/// Failure reported by the remote console service.
///
/// Carries the service's own diagnostic unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    /// Wraps a remote diagnostic.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the diagnostic.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur during selection operations.
#[derive(Debug, Error)]
pub enum TenancyError {
    /// A required ancestor is not selected.
    #[error("no {} selected; select {} first", .0.label(), .0.with_article())]
    MissingSelection(Level),

    /// No entity at `level` matched the given id, code or name.
    #[error("no {} found matching '{key}'", .level.label())]
    NotFound {
        /// Level searched.
        level: Level,
        /// Key that failed to match.
        key: String,
    },

    /// A persisted slot holds something that is not an entity snapshot.
    #[error("stored {} selection is corrupt: {source}", .level.label())]
    CorruptSelection {
        /// Slot that failed to decode.
        level: Level,
        /// Decode error.
        source: serde_json::Error,
    },

    /// An entity could not be encoded for storage.
    #[error("failed to encode {} snapshot: {source}", .level.label())]
    Encode {
        /// Slot being written.
        level: Level,
        /// Encode error.
        source: serde_json::Error,
    },

    /// The selection store failed.
    #[error(transparent)]
    Store(#[from] ConfigError),

    /// The remote console service failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, TenancyError>;
