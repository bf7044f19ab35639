//! Precondition checks run before any remote call.

use console_config::SelectionStore;
use tracing::debug;

use crate::context::SelectionContext;
use crate::error::{Result, TenancyError};
use crate::level::Level;

/// Explicit ids supplied on the command line. They take precedence over
/// the stored selection. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Organization ID override.
    pub org_id: Option<String>,
    /// Project ID override.
    pub project_id: Option<String>,
    /// Workspace ID override.
    pub workspace_id: Option<String>,
}

impl Overrides {
    /// Returns the override for `level`, ignoring empty strings.
    #[must_use]
    pub fn get(&self, level: Level) -> Option<&str> {
        let value = match level {
            Level::Org => self.org_id.as_deref(),
            Level::Project => self.project_id.as_deref(),
            Level::Workspace => self.workspace_id.as_deref(),
        };
        value.filter(|id| !id.is_empty())
    }
}

/// Ids resolved for a set of required levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScope {
    ids: [Option<String>; 3],
}

impl ResolvedScope {
    /// Id resolved for `level`, if it was required.
    #[must_use]
    pub fn id(&self, level: Level) -> Option<&str> {
        self.ids[level.index()].as_deref()
    }

    fn take(&mut self, level: Level) -> String {
        self.ids[level.index()].take().unwrap_or_default()
    }
}

/// Organization and Project ids for project-scoped calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    /// Organization ID.
    pub org_id: String,
    /// Project ID.
    pub project_id: String,
}

/// Organization, Project and Workspace ids for workspace-scoped calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRef {
    /// Organization ID.
    pub org_id: String,
    /// Project ID.
    pub project_id: String,
    /// Workspace ID.
    pub workspace_id: String,
}

impl WorkspaceRef {
    /// The enclosing project.
    #[must_use]
    pub fn project(&self) -> ProjectRef {
        ProjectRef {
            org_id: self.org_id.clone(),
            project_id: self.project_id.clone(),
        }
    }
}

/// Checks that required levels are selected (or overridden) before an
/// operation touches the remote service.
///
/// Missing levels are reported ancestor first, so a user with nothing
/// selected is told to pick an Organization rather than a Workspace.
#[derive(Debug)]
pub struct ContextGate<'a, S> {
    context: &'a SelectionContext<S>,
    overrides: Overrides,
}

impl<'a, S: SelectionStore> ContextGate<'a, S> {
    /// Gate backed by the stored selection only.
    pub fn new(context: &'a SelectionContext<S>) -> Self {
        Self {
            context,
            overrides: Overrides::default(),
        }
    }

    /// Gate that prefers `overrides` over the stored selection.
    pub const fn with_overrides(context: &'a SelectionContext<S>, overrides: Overrides) -> Self {
        Self { context, overrides }
    }

    /// Resolves an id for every level in `levels`.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyError::MissingSelection`] naming the shallowest
    /// level that is neither overridden nor selected.
    pub fn require(&self, levels: &[Level]) -> Result<ResolvedScope> {
        let mut wanted = levels.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut scope = ResolvedScope::default();
        for level in wanted {
            let id = self
                .overrides
                .get(level)
                .map(str::to_string)
                .or_else(|| self.context.id(level))
                .ok_or(TenancyError::MissingSelection(level))?;
            debug!(level = %level, id = %id, "resolved scope");
            scope.ids[level.index()] = Some(id);
        }
        Ok(scope)
    }

    /// Resolves the Organization ID.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyError::MissingSelection`] if no Organization is
    /// available.
    pub fn require_org(&self) -> Result<String> {
        let mut scope = self.require(&[Level::Org])?;
        Ok(scope.take(Level::Org))
    }

    /// Resolves Organization and Project ids.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyError::MissingSelection`] for the first missing
    /// level.
    pub fn require_project(&self) -> Result<ProjectRef> {
        let mut scope = self.require(&[Level::Org, Level::Project])?;
        Ok(ProjectRef {
            org_id: scope.take(Level::Org),
            project_id: scope.take(Level::Project),
        })
    }

    /// Resolves Organization, Project and Workspace ids.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyError::MissingSelection`] for the first missing
    /// level.
    pub fn require_workspace(&self) -> Result<WorkspaceRef> {
        let mut scope = self.require(&Level::ALL)?;
        Ok(WorkspaceRef {
            org_id: scope.take(Level::Org),
            project_id: scope.take(Level::Project),
            workspace_id: scope.take(Level::Workspace),
        })
    }
}
