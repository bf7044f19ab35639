//! Public key command implementation: certificate bindings of a Workspace.

use std::fs;
use std::io::Write;
use std::path::Path;

use console_config::SelectionStore;
use console_pki::{BindingReconciler, Error as BindingError};
use console_tenancy::{ContextGate, SelectionContext, WorkspaceRef};
use tracing::debug;

use crate::cli::{PublicKeyCommands, ScopeArgs};
use crate::client::ConsoleClient;
use crate::error::CliError;
use crate::output::{Message, OutputFormat};

/// Handler for public key subcommands.
pub struct PublicKeyCommand<'a, C, S> {
    client: &'a C,
    context: &'a SelectionContext<S>,
}

impl<'a, C: ConsoleClient, S: SelectionStore> PublicKeyCommand<'a, C, S> {
    /// Creates a new public key command handler.
    #[must_use]
    pub const fn new(client: &'a C, context: &'a SelectionContext<S>) -> Self {
        Self { client, context }
    }

    /// Executes the public key subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if no Workspace is selected or given, the certificate
    /// file is invalid, or the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &PublicKeyCommands,
    ) -> Result<(), CliError> {
        match command {
            PublicKeyCommands::List { scope } => {
                let workspace = self.target(scope)?;
                let bindings = self.client.list_bindings(&workspace).await?;
                format.write(out, &bindings)
            }
            PublicKeyCommands::Upload { file, scope } => {
                let workspace = self.target(scope)?;
                self.upload(out, format, &workspace, file).await
            }
            PublicKeyCommands::Delete {
                id_or_fingerprint,
                scope,
            } => {
                let workspace = self.target(scope)?;
                self.delete(out, format, &workspace, id_or_fingerprint).await
            }
        }
    }

    fn target(&self, scope: &ScopeArgs) -> Result<WorkspaceRef, CliError> {
        Ok(ContextGate::with_overrides(self.context, scope.into()).require_workspace()?)
    }

    async fn upload<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        workspace: &WorkspaceRef,
        file: &Path,
    ) -> Result<(), CliError> {
        let bytes = read_certificate_file(file)?;
        debug!(file = %file.display(), bytes = bytes.len(), "read certificate");

        let binding = BindingReconciler::new(self.client)
            .reconcile(workspace, &bytes)
            .await?;
        format.write(out, &vec![binding])
    }

    async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        workspace: &WorkspaceRef,
        key: &str,
    ) -> Result<(), CliError> {
        let name = self.client.get_workspace(workspace).await?.name;

        let deleted = match BindingReconciler::new(self.client)
            .delete_binding(workspace, key)
            .await
        {
            Ok(binding) => binding,
            Err(BindingError::BindingDeleteFailed { binding_id, .. }) => {
                return Err(BindingError::BindingDeleteFailed {
                    binding_id,
                    workspace: name,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        format.write(
            out,
            &Message::success(format!(
                "Deleted binding {} from workspace {name}",
                deleted.binding_id
            )),
        )
    }
}

/// Reads a certificate file, rejecting anything that is not a regular file
/// before a remote call is made.
fn read_certificate_file(path: &Path) -> Result<Vec<u8>, CliError> {
    let invalid = || CliError::InvalidArgument(format!("Invalid publicKey file: {}", path.display()));
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(fs::read(path)?),
        _ => Err(invalid()),
    }
}
