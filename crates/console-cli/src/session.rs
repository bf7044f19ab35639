//! Per-invocation setup: the selection store and the remote client.

use std::path::{Path, PathBuf};

use console_config::{default_config_path, migrate_root, JsonFileStore, LEGACY_SELECTION_ROOT};
use console_tenancy::{SelectionContext, SELECTION_ROOT};
use tracing::info;

use crate::cli::Cli;
use crate::client::HttpConsoleClient;
use crate::error::CliError;

/// Opens the selection store at `path` (or the default location) and moves
/// a selection saved under the legacy root key to the current one.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or migrated.
pub fn open_context(path: Option<&Path>) -> Result<SelectionContext<JsonFileStore>, CliError> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    let mut store = JsonFileStore::open(path)?;
    if migrate_root(&mut store, LEGACY_SELECTION_ROOT, SELECTION_ROOT)? {
        info!(
            path = %store.path().display(),
            "migrated selection from '{LEGACY_SELECTION_ROOT}' to '{SELECTION_ROOT}'"
        );
    }
    Ok(SelectionContext::new(store))
}

/// Builds the HTTP client from the global flags.
///
/// # Errors
///
/// Returns [`CliError::Config`] if no API URL is configured or it is
/// invalid.
pub fn http_client(cli: &Cli) -> Result<HttpConsoleClient, CliError> {
    let base_url = cli.api_url.as_deref().filter(|url| !url.is_empty()).ok_or_else(|| {
        CliError::Config("no API URL configured; pass --api-url or set CONSOLE_API_URL".into())
    })?;
    HttpConsoleClient::new(base_url, cli.access_token.clone(), cli.api_key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use console_config::SelectionStore;
    use console_tenancy::{Level, SelectionState};
    use serde_json::json;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = open_context(Some(&dir.path().join("config.json"))).expect("open");
        assert_eq!(ctx.state(), SelectionState::Empty);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn legacy_selection_is_migrated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            json!({ "$console": { "org": { "id": "1", "code": "ACME", "name": "Acme" } } })
                .to_string(),
        )
        .expect("write");

        let ctx = open_context(Some(&path)).expect("open");
        assert_eq!(ctx.id(Level::Org).as_deref(), Some("1"));
        assert!(ctx.store().get("$console").is_none());

        let reopened: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(reopened["console"]["org"]["name"], "Acme");
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(open_context(Some(&path)), Err(CliError::Store(_))));
    }

    #[test]
    fn client_requires_api_url() {
        let mut cli = Cli::parse_from(["console", "org", "list"]);
        cli.api_url = None;
        assert!(matches!(http_client(&cli), Err(CliError::Config(_))));

        cli.api_url = Some("https://console.example".into());
        assert!(http_client(&cli).is_ok());
    }
}
