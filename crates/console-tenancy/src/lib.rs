//! # console-tenancy
//!
//! The Organization → Project → Workspace selection that scopes every
//! console command.
//!
//! - **Entities**: [`Organization`], [`Project`] and [`Workspace`] records
//!   as returned by the console service
//! - **Selection**: [`SelectionContext`] persists one entity per level and
//!   cascades changes downward
//! - **Gating**: [`ContextGate`] checks that the levels an operation needs
//!   are selected before anything remote happens
//!
//! ## Hierarchy
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Organization (only type "entp" is listed)    │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ Project                                │  │
//! │  │  ┌──────────────┐  ┌──────────────┐    │  │
//! │  │  │  Workspace   │  │  Workspace   │    │  │
//! │  │  │ (Production) │  │   (Stage)    │    │  │
//! │  │  └──────────────┘  └──────────────┘    │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Selecting a level clears everything below it, so a stored Workspace
//! always belongs to the stored Project and Organization.
//!
//! ## Example
//!
//! ```rust
//! use console_config::MemoryStore;
//! use console_tenancy::{ContextGate, Level, Organization, SelectionContext, TenancyError};
//!
//! let mut ctx = SelectionContext::new(MemoryStore::new());
//! ctx.select(&Organization {
//!     id: "1".into(),
//!     code: "ACME".into(),
//!     name: "Acme".into(),
//!     org_type: None,
//! })?;
//!
//! // Workspace-scoped operations need a Project first.
//! let err = ContextGate::new(&ctx).require_workspace().unwrap_err();
//! assert!(matches!(err, TenancyError::MissingSelection(Level::Project)));
//!
//! assert_eq!(ctx.describe().org, "Acme");
//! # Ok::<(), console_tenancy::TenancyError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod entity;
mod error;
mod gate;
mod level;
mod url;

pub use context::{SelectionContext, SelectionState, SelectionSummary, NOT_SELECTED, SELECTION_ROOT};
pub use entity::{
    enterprise_only, find_by_key, Organization, Project, Scoped, Workspace, ORG_TYPE_ENTERPRISE,
};
pub use error::{RemoteError, Result, TenancyError};
pub use gate::{ContextGate, Overrides, ProjectRef, ResolvedScope, WorkspaceRef};
pub use level::Level;
pub use url::console_url;
