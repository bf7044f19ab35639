//! # console-cli
//!
//! Command-line interface for the developer console.
//!
//! Provides commands for:
//! - Selecting an Organization, Project and Workspace
//! - Downloading a Workspace configuration
//! - Uploading, listing and deleting Workspace certificate bindings
//!
//! # Architecture
//!
//! Every command reads the selection persisted by
//! [`console_tenancy::SelectionContext`] and checks its preconditions
//! through a [`console_tenancy::ContextGate`] before the
//! [`client::HttpConsoleClient`] talks to the console API.
//!
//! ```text
//! ┌─────────────┐   selection    ┌──────────────────┐
//! │ console-cli │◄──────────────►│ config.json      │
//! └──────┬──────┘                └──────────────────┘
//!        │ HTTPS (JSON, multipart)
//!        ▼
//! ┌─────────────┐
//! │ console API │
//! └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Commands, Format, ScopeArgs};
pub use client::{ConsoleClient, HttpConsoleClient};
pub use error::CliError;
pub use output::OutputFormat;
