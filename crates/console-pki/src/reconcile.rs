//! Idempotent certificate upload and binding removal.

use console_tenancy::WorkspaceRef;
use tracing::{debug, info};

use crate::binding::CertificateBinding;
use crate::certificate::Certificate;
use crate::client::BindingClient;
use crate::error::{Error, Result};

/// Makes a certificate bound to a workspace without duplicating existing
/// bindings.
#[derive(Debug)]
pub struct BindingReconciler<'a, C> {
    client: &'a C,
}

impl<'a, C: BindingClient> BindingReconciler<'a, C> {
    /// Creates a reconciler over `client`.
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Ensures `certificate` is bound to `workspace`.
    ///
    /// Returns the existing binding with the same fingerprint when there is
    /// one, otherwise uploads `certificate` unchanged and returns the new
    /// binding. The bindings are read fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateFormat`] before any remote call if the
    /// bytes are not a certificate, or [`Error::Remote`] if the service
    /// fails.
    pub async fn reconcile(
        &self,
        workspace: &WorkspaceRef,
        certificate: &[u8],
    ) -> Result<CertificateBinding> {
        let parsed = Certificate::from_pem_or_der(certificate)?;
        let fingerprint = parsed.fingerprint();

        let existing = self.client.list_bindings(workspace).await?;
        if let Some(found) = existing
            .into_iter()
            .find(|binding| binding.certificate_fingerprint == fingerprint)
        {
            debug!(
                fingerprint = %fingerprint,
                binding_id = %found.binding_id,
                "found existing binding matching fingerprint, skipping upload"
            );
            return Ok(found);
        }

        let created = self
            .client
            .upload_and_bind(workspace, &parsed, certificate)
            .await?;
        info!(
            workspace = %workspace.workspace_id,
            binding_id = %created.binding_id,
            fingerprint = %created.certificate_fingerprint,
            "bound certificate"
        );
        Ok(created)
    }

    /// Deletes the first binding whose id or fingerprint equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BindingNotFound`] if nothing matches,
    /// [`Error::BindingDeleteFailed`] if the service refuses the delete, or
    /// [`Error::Remote`] if a call fails.
    pub async fn delete_binding(
        &self,
        workspace: &WorkspaceRef,
        key: &str,
    ) -> Result<CertificateBinding> {
        let bindings = self.client.list_bindings(workspace).await?;
        let found = bindings
            .into_iter()
            .find(|binding| binding.matches(key))
            .ok_or_else(|| Error::BindingNotFound(key.to_string()))?;

        if !self.client.delete_binding(workspace, &found).await? {
            return Err(Error::BindingDeleteFailed {
                binding_id: found.binding_id,
                workspace: workspace.workspace_id.clone(),
            });
        }
        info!(
            workspace = %workspace.workspace_id,
            binding_id = %found.binding_id,
            "deleted binding"
        );
        Ok(found)
    }
}
