//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`org`] - Organization listing and selection
//! - [`project`] - Project listing and selection
//! - [`workspace`] - Workspace listing, selection and download
//! - [`publickey`] - Certificate bindings of a Workspace
//! - [`selection`] - `where`, `clear` and `open`

pub mod org;
pub mod project;
pub mod publickey;
pub mod selection;
pub mod workspace;

use std::io::Write;

use console_config::SelectionStore;
use console_tenancy::SelectionContext;

use crate::error::CliError;
use crate::output::{Message, OutputFormat};

pub use org::OrgCommand;
pub use project::ProjectCommand;
pub use publickey::PublicKeyCommand;
pub use selection::{ClearCommand, OpenCommand, WhereCommand};
pub use workspace::WorkspaceCommand;

/// Reports a selection change: the message and resulting selection as
/// text, or just the selection as JSON.
fn report_selection<W: Write, S: SelectionStore>(
    out: &mut W,
    format: &OutputFormat,
    context: &SelectionContext<S>,
    message: String,
) -> Result<(), CliError> {
    if !format.is_json() {
        format.write(out, &Message::success(message))?;
    }
    format.write(out, &context.describe())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory console service for command tests.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use console_pki::{BindingClient, Certificate, CertificateBinding};
    use console_tenancy::{Organization, Project, ProjectRef, RemoteError, Workspace, WorkspaceRef};
    use serde_json::{json, Value};

    use crate::client::ConsoleClient;

    /// Console service double that counts every remote call.
    #[derive(Debug)]
    pub(crate) struct MockConsoleClient {
        pub(crate) orgs: Vec<Organization>,
        pub(crate) projects: Vec<Project>,
        pub(crate) workspaces: Vec<Workspace>,
        pub(crate) bindings: Mutex<Vec<CertificateBinding>>,
        pub(crate) calls: AtomicUsize,
        pub(crate) uploads: AtomicUsize,
        pub(crate) fail_with: Option<String>,
        pub(crate) refuse_delete: bool,
    }

    impl MockConsoleClient {
        pub(crate) fn new() -> Self {
            Self {
                orgs: vec![
                    Organization {
                        id: "1".into(),
                        code: "ACME".into(),
                        name: "Acme".into(),
                        org_type: Some("entp".into()),
                    },
                    Organization {
                        id: "2".into(),
                        code: "GLOBEX".into(),
                        name: "Globex".into(),
                        org_type: Some("entp".into()),
                    },
                    Organization {
                        id: "3".into(),
                        code: "DEV".into(),
                        name: "Personal".into(),
                        org_type: Some("developer".into()),
                    },
                ],
                projects: vec![
                    Project {
                        id: "p1".into(),
                        name: "shop".into(),
                        title: "Shop".into(),
                        org_id: "1".into(),
                    },
                    Project {
                        id: "p2".into(),
                        name: "blog".into(),
                        title: "Blog".into(),
                        org_id: "2".into(),
                    },
                ],
                workspaces: vec![
                    Workspace {
                        id: "w1".into(),
                        name: "Production".into(),
                    },
                    Workspace {
                        id: "w2".into(),
                        name: "Stage".into(),
                    },
                ],
                bindings: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                uploads: AtomicUsize::new(0),
                fail_with: None,
                refuse_delete: false,
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn uploads(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }

        pub(crate) fn with_bindings(self, bindings: Vec<CertificateBinding>) -> Self {
            Self {
                bindings: Mutex::new(bindings),
                ..self
            }
        }

        fn call(&self) -> Result<(), RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.fail_with.as_ref().map_or(Ok(()), |m| Err(RemoteError::new(m)))
        }

        fn workspace(&self, id: &str) -> Result<Workspace, RemoteError> {
            self.workspaces
                .iter()
                .find(|w| w.id == id)
                .cloned()
                .ok_or_else(|| RemoteError::new(format!("404 Not Found: workspace {id}")))
        }
    }

    impl BindingClient for MockConsoleClient {
        async fn list_bindings(
            &self,
            _workspace: &WorkspaceRef,
        ) -> Result<Vec<CertificateBinding>, RemoteError> {
            self.call()?;
            Ok(self.bindings.lock().map(|b| b.clone()).unwrap_or_default())
        }

        async fn upload_and_bind(
            &self,
            workspace: &WorkspaceRef,
            certificate: &Certificate,
            _contents: &[u8],
        ) -> Result<CertificateBinding, RemoteError> {
            self.call()?;
            let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
            let created = CertificateBinding {
                binding_id: format!("new-{n}"),
                org_id: workspace.org_id.clone(),
                technical_account_id: "ta".into(),
                certificate_fingerprint: certificate.fingerprint(),
                not_after: Some(certificate.not_after().timestamp_millis()),
            };
            if let Ok(mut bindings) = self.bindings.lock() {
                bindings.push(created.clone());
            }
            Ok(created)
        }

        async fn delete_binding(
            &self,
            _workspace: &WorkspaceRef,
            binding: &CertificateBinding,
        ) -> Result<bool, RemoteError> {
            self.call()?;
            if self.refuse_delete {
                return Ok(false);
            }
            let mut bindings = self
                .bindings
                .lock()
                .map_err(|_| RemoteError::new("poisoned"))?;
            let before = bindings.len();
            bindings.retain(|b| b.binding_id != binding.binding_id);
            Ok(bindings.len() < before)
        }
    }

    impl ConsoleClient for MockConsoleClient {
        async fn list_organizations(&self) -> Result<Vec<Organization>, RemoteError> {
            self.call()?;
            Ok(self.orgs.clone())
        }

        async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>, RemoteError> {
            self.call()?;
            Ok(self
                .projects
                .iter()
                .filter(|p| p.org_id == org_id)
                .cloned()
                .collect())
        }

        async fn get_project(&self, project: &ProjectRef) -> Result<Project, RemoteError> {
            self.call()?;
            self.projects
                .iter()
                .find(|p| p.id == project.project_id)
                .cloned()
                .ok_or_else(|| RemoteError::new("404 Not Found: project"))
        }

        async fn list_workspaces(&self, _project: &ProjectRef) -> Result<Vec<Workspace>, RemoteError> {
            self.call()?;
            Ok(self.workspaces.clone())
        }

        async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace, RemoteError> {
            self.call()?;
            self.workspace(&workspace.workspace_id)
        }

        async fn download_workspace(&self, workspace: &WorkspaceRef) -> Result<Value, RemoteError> {
            self.call()?;
            let ws = self.workspace(&workspace.workspace_id)?;
            Ok(json!({
                "project": {
                    "id": workspace.project_id,
                    "org": { "id": workspace.org_id },
                    "workspace": { "id": ws.id, "name": ws.name }
                }
            }))
        }
    }
}
