//! Configuration store for the console CLI.
//!
//! Provides the key-path addressed [`SelectionStore`] contract plus a JSON
//! file backed implementation ([`JsonFileStore`]) and an in-memory one
//! ([`MemoryStore`]).

#![forbid(unsafe_code)]

pub mod document;
mod error;
mod migrate;
mod store;

use std::path::PathBuf;

pub use error::{ConfigError, Result};
pub use migrate::{migrate_root, LEGACY_SELECTION_ROOT};
pub use store::{JsonFileStore, MemoryStore, SelectionStore};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "console";

/// File name of the persisted configuration.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the default config file location,
/// `<platform config dir>/console/config.json`.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if the platform has no config dir.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}
