//! Web console links for the current selection.

use crate::entity::{Project, Workspace};

/// Builds the web console URL for a project and, optionally, one of its
/// workspaces. Without a project (or one missing its ids) the base URL is
/// returned as is.
#[must_use]
pub fn console_url(base: &str, project: Option<&Project>, workspace: Option<&Workspace>) -> String {
    let base = base.trim_end_matches('/');
    let Some(project) = project.filter(|p| !p.id.is_empty() && !p.org_id.is_empty()) else {
        return base.to_string();
    };
    let project_url = format!("{base}/{}/{}", project.org_id, project.id);
    match workspace {
        Some(workspace) => format!("{project_url}/workspaces/{}/details", workspace.id),
        None => format!("{project_url}/overview"),
    }
}
