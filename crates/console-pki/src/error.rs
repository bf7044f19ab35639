//! Certificate and binding error types.

use console_tenancy::{RemoteError, TenancyError};
use thiserror::Error;

/// Result type for certificate and binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Certificate and binding error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a PEM or DER X.509 certificate.
    #[error("invalid certificate: {0}")]
    CertificateFormat(String),

    /// No binding matched the given id or fingerprint.
    #[error("No binding found with bindingId or fingerprint {0}")]
    BindingNotFound(String),

    /// The remote refused to delete a matched binding.
    #[error("Failed to delete binding {binding_id} from workspace {workspace}")]
    BindingDeleteFailed {
        /// Binding that was matched.
        binding_id: String,
        /// Workspace it belongs to.
        workspace: String,
    },

    /// The remote console service failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A selection precondition failed.
    #[error(transparent)]
    Tenancy(#[from] TenancyError),
}
