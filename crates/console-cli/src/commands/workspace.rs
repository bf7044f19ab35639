//! Workspace command implementation.

use std::fs;
use std::io::Write;
use std::path::Path;

use console_config::SelectionStore;
use console_tenancy::{find_by_key, ContextGate, Overrides, SelectionContext};
use tracing::{debug, info};

use crate::cli::{ScopeArgs, WorkspaceCommands};
use crate::client::ConsoleClient;
use crate::error::CliError;
use crate::output::{Message, OutputFormat};

use super::report_selection;

/// Handler for workspace subcommands.
pub struct WorkspaceCommand<'a, C, S> {
    client: &'a C,
    context: &'a mut SelectionContext<S>,
}

impl<'a, C: ConsoleClient, S: SelectionStore> WorkspaceCommand<'a, C, S> {
    /// Creates a new workspace command handler.
    #[must_use]
    pub fn new(client: &'a C, context: &'a mut SelectionContext<S>) -> Self {
        Self { client, context }
    }

    /// Executes the workspace subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the Organization or Project is missing, or the
    /// command fails.
    pub async fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &WorkspaceCommands,
    ) -> Result<(), CliError> {
        match command {
            WorkspaceCommands::List { org_id, project_id } => {
                let overrides = Overrides {
                    org_id: org_id.clone(),
                    project_id: project_id.clone(),
                    workspace_id: None,
                };
                self.list(out, format, overrides).await
            }
            WorkspaceCommands::Select { workspace } => self.select(out, format, workspace).await,
            WorkspaceCommands::Download { destination, scope } => {
                self.download(out, format, destination.as_deref(), scope).await
            }
        }
    }

    async fn list<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        overrides: Overrides,
    ) -> Result<(), CliError> {
        let project = ContextGate::with_overrides(self.context, overrides).require_project()?;
        debug!(project_id = %project.project_id, "listing workspaces");
        let workspaces = self.client.list_workspaces(&project).await?;
        format.write(out, &workspaces)
    }

    async fn select<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        key: &str,
    ) -> Result<(), CliError> {
        let project = ContextGate::new(self.context).require_project()?;
        let workspaces = self.client.list_workspaces(&project).await?;
        let workspace = find_by_key(&workspaces, key)?;
        self.context.select(workspace)?;
        report_selection(
            out,
            format,
            self.context,
            format!("Workspace selected {}", workspace.name),
        )
    }

    async fn download<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        destination: Option<&Path>,
        scope: &ScopeArgs,
    ) -> Result<(), CliError> {
        let target =
            ContextGate::with_overrides(self.context, scope.into()).require_workspace()?;

        let project = self.client.get_project(&target.project()).await?;
        let workspace = self.client.get_workspace(&target).await?;
        let document = self.client.download_workspace(&target).await?;

        let dir = destination.unwrap_or_else(|| Path::new("."));
        let path = dir.join(download_file_name(&target.org_id, &project.name, &workspace.name));
        write_document(&path, &document)?;
        info!(path = %path.display(), workspace_id = %target.workspace_id, "downloaded workspace");

        format.write(
            out,
            &Message::success(format!(
                "Downloaded Workspace configuration to {}",
                path.display()
            )),
        )
    }
}

/// File name of a downloaded Workspace configuration. Path separators and
/// control characters in the remote names become `_`, so the file always
/// lands directly in the destination directory.
fn download_file_name(org_id: &str, project: &str, workspace: &str) -> String {
    let name = format!("{org_id}-{project}-{workspace}.json");
    name.chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect()
}

fn write_document(path: &Path, document: &serde_json::Value) -> Result<(), CliError> {
    let mut body = serde_json::to_string_pretty(document)
        .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}
