//! Remote operations on a workspace's certificate bindings.

use console_tenancy::{RemoteError, WorkspaceRef};

use crate::binding::CertificateBinding;
use crate::certificate::Certificate;

/// Remote access to certificate bindings.
///
/// Failures carry the service's diagnostic in a [`RemoteError`].
#[allow(async_fn_in_trait)]
pub trait BindingClient {
    /// Lists the bindings of a workspace, fetched fresh on every call.
    async fn list_bindings(
        &self,
        workspace: &WorkspaceRef,
    ) -> Result<Vec<CertificateBinding>, RemoteError>;

    /// Uploads a certificate and binds it to the workspace.
    ///
    /// `contents` is the certificate file exactly as supplied; `certificate`
    /// is its parsed (first) certificate.
    async fn upload_and_bind(
        &self,
        workspace: &WorkspaceRef,
        certificate: &Certificate,
        contents: &[u8],
    ) -> Result<CertificateBinding, RemoteError>;

    /// Deletes a binding. Returns `false` if the service reports it could
    /// not be deleted.
    async fn delete_binding(
        &self,
        workspace: &WorkspaceRef,
        binding: &CertificateBinding,
    ) -> Result<bool, RemoteError>;
}
