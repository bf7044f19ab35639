//! Console service client.
//!
//! [`ConsoleClient`] is the remote surface the commands drive;
//! [`HttpConsoleClient`] implements it over HTTPS with reqwest.
//!
//! # Example
//!
//! ```rust,no_run
//! use console_cli::client::{ConsoleClient, HttpConsoleClient};
//!
//! # async fn example() -> Result<(), console_cli::CliError> {
//! let client = HttpConsoleClient::new(
//!     "https://console.example/api",
//!     Some("token".to_string()),
//!     Some("api-key".to_string()),
//! )?;
//! let orgs = client.list_organizations().await?;
//! println!("Organizations: {}", orgs.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use console_pki::{BindingClient, Certificate, CertificateBinding};
use console_tenancy::{Organization, Project, ProjectRef, RemoteError, Workspace, WorkspaceRef};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::CliError;

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart field carrying an uploaded certificate.
const CERTIFICATE_FIELD: &str = "certificate";

/// Remote operations of the console service.
///
/// Failures carry the service's own diagnostic in a [`RemoteError`].
#[allow(async_fn_in_trait)]
pub trait ConsoleClient: BindingClient {
    /// Lists every Organization visible to the caller.
    async fn list_organizations(&self) -> Result<Vec<Organization>, RemoteError>;

    /// Lists the Projects of an Organization.
    async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>, RemoteError>;

    /// Fetches one Project.
    async fn get_project(&self, project: &ProjectRef) -> Result<Project, RemoteError>;

    /// Lists the Workspaces of a Project.
    async fn list_workspaces(&self, project: &ProjectRef) -> Result<Vec<Workspace>, RemoteError>;

    /// Fetches one Workspace.
    async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace, RemoteError>;

    /// Downloads a Workspace's configuration document.
    async fn download_workspace(&self, workspace: &WorkspaceRef) -> Result<Value, RemoteError>;
}

/// HTTP client for the console API.
pub struct HttpConsoleClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    api_key: Option<String>,
}

impl std::fmt::Debug for HttpConsoleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConsoleClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_access_token", &self.access_token.is_some())
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpConsoleClient {
    /// Creates a client for the API at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the URL is not an absolute HTTP(S)
    /// URL or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        access_token: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, CliError> {
        Self::with_timeout(base_url, access_token, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_timeout(
        base_url: &str,
        access_token: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CliError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CliError::Config(format!("invalid API URL '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(CliError::Config(format!(
                "invalid API URL '{base_url}': expected an http(s) URL"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            access_token: access_token.filter(|t| !t.is_empty()),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds `<base>/<segments...>`, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "console request");
        let mut request = self
            .http
            .request(method, url)
            .header("accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::new(format!("request failed: {e}")))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(remote_error(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, RemoteError> {
        let response = Self::send(self.request(Method::GET, self.endpoint(segments))).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::new(format!("invalid response body: {e}")))
    }

    fn workspace_segments<'a>(workspace: &'a WorkspaceRef, tail: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec![
            "organizations",
            workspace.org_id.as_str(),
            "projects",
            workspace.project_id.as_str(),
            "workspaces",
            workspace.workspace_id.as_str(),
        ];
        segments.extend_from_slice(tail);
        segments
    }
}

/// Turns a non-success response into a [`RemoteError`], preferring the
/// service's `message` field over the raw body.
async fn remote_error(response: Response) -> RemoteError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    RemoteError::new(format!("{status}: {}", error_detail(status, &body)))
}

fn error_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

impl BindingClient for HttpConsoleClient {
    async fn list_bindings(
        &self,
        workspace: &WorkspaceRef,
    ) -> Result<Vec<CertificateBinding>, RemoteError> {
        self.get_json(&Self::workspace_segments(workspace, &["bindings"]))
            .await
    }

    async fn upload_and_bind(
        &self,
        workspace: &WorkspaceRef,
        certificate: &Certificate,
        contents: &[u8],
    ) -> Result<CertificateBinding, RemoteError> {
        debug!(subject = certificate.subject(), bytes = contents.len(), "uploading certificate");
        let part = reqwest::multipart::Part::bytes(contents.to_vec())
            .file_name("certificate.pem")
            .mime_str("application/x-pem-file")
            .map_err(|e| RemoteError::new(format!("invalid upload: {e}")))?;
        let form = reqwest::multipart::Form::new().part(CERTIFICATE_FIELD, part);

        let url = self.endpoint(&Self::workspace_segments(workspace, &["bindings"]));
        let response = Self::send(self.request(Method::POST, url).multipart(form)).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::new(format!("invalid response body: {e}")))
    }

    async fn delete_binding(
        &self,
        workspace: &WorkspaceRef,
        binding: &CertificateBinding,
    ) -> Result<bool, RemoteError> {
        let url = self.endpoint(&Self::workspace_segments(
            workspace,
            &["bindings", binding.binding_id.as_str()],
        ));
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(|e| RemoteError::new(format!("request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => {
                debug!(binding_id = %binding.binding_id, "binding already gone");
                Ok(false)
            }
            _ => Err(remote_error(response).await),
        }
    }
}

impl ConsoleClient for HttpConsoleClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>, RemoteError> {
        self.get_json(&["organizations"]).await
    }

    async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>, RemoteError> {
        self.get_json(&["organizations", org_id, "projects"]).await
    }

    async fn get_project(&self, project: &ProjectRef) -> Result<Project, RemoteError> {
        self.get_json(&[
            "organizations",
            project.org_id.as_str(),
            "projects",
            project.project_id.as_str(),
        ])
        .await
    }

    async fn list_workspaces(&self, project: &ProjectRef) -> Result<Vec<Workspace>, RemoteError> {
        self.get_json(&[
            "organizations",
            project.org_id.as_str(),
            "projects",
            project.project_id.as_str(),
            "workspaces",
        ])
        .await
    }

    async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace, RemoteError> {
        self.get_json(&Self::workspace_segments(workspace, &[])).await
    }

    async fn download_workspace(&self, workspace: &WorkspaceRef) -> Result<Value, RemoteError> {
        self.get_json(&Self::workspace_segments(workspace, &["download"]))
            .await
    }
}
