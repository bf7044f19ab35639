//! CLI error types.

use std::fmt;

use console_config::ConfigError;
use console_tenancy::{RemoteError, TenancyError};

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration.
    Config(String),
    /// Selection store failure.
    Store(ConfigError),
    /// Selection precondition or lookup failure.
    Selection(TenancyError),
    /// Certificate or binding failure.
    Binding(console_pki::Error),
    /// The console service failed.
    Remote(RemoteError),
    /// Output formatting error.
    Format(String),
    /// Invalid argument.
    InvalidArgument(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::Selection(e) => write!(f, "{e}"),
            Self::Binding(e) => write!(f, "{e}"),
            Self::Remote(e) => write!(f, "{e}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Selection(e) => Some(e),
            Self::Binding(e) => Some(e),
            Self::Remote(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Store(err)
    }
}

impl From<TenancyError> for CliError {
    fn from(err: TenancyError) -> Self {
        match err {
            TenancyError::Store(e) => Self::Store(e),
            TenancyError::Remote(e) => Self::Remote(e),
            other => Self::Selection(other),
        }
    }
}

impl From<console_pki::Error> for CliError {
    fn from(err: console_pki::Error) -> Self {
        match err {
            console_pki::Error::Remote(e) => Self::Remote(e),
            console_pki::Error::Tenancy(e) => Self::from(e),
            other => Self::Binding(other),
        }
    }
}

impl From<RemoteError> for CliError {
    fn from(err: RemoteError) -> Self {
        Self::Remote(err)
    }
}
