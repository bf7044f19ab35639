//! Organization command implementation.

use std::io::Write;

use console_config::SelectionStore;
use console_tenancy::{enterprise_only, find_by_key, SelectionContext};
use tracing::debug;

use crate::cli::OrgCommands;
use crate::client::ConsoleClient;
use crate::error::CliError;
use crate::output::OutputFormat;

use super::report_selection;

/// Handler for organization subcommands.
pub struct OrgCommand<'a, C, S> {
    client: &'a C,
    context: &'a mut SelectionContext<S>,
}

impl<'a, C: ConsoleClient, S: SelectionStore> OrgCommand<'a, C, S> {
    /// Creates a new organization command handler.
    #[must_use]
    pub fn new(client: &'a C, context: &'a mut SelectionContext<S>) -> Self {
        Self { client, context }
    }

    /// Executes the organization subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &OrgCommands,
    ) -> Result<(), CliError> {
        match command {
            OrgCommands::List => self.list(out, format).await,
            OrgCommands::Select { org } => self.select(out, format, org).await,
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        debug!("listing organizations");
        let orgs = enterprise_only(self.client.list_organizations().await?);
        format.write(out, &orgs)
    }

    async fn select<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        key: &str,
    ) -> Result<(), CliError> {
        let orgs = enterprise_only(self.client.list_organizations().await?);
        let org = find_by_key(&orgs, key)?;
        self.context.select(org)?;
        report_selection(out, format, self.context, format!("Org selected {}", org.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::testing::MockConsoleClient;
    use console_config::MemoryStore;
    use console_tenancy::{Level, Project, SelectionState, TenancyError};

    async fn run(
        client: &MockConsoleClient,
        ctx: &mut SelectionContext<MemoryStore>,
        format: Format,
        command: &OrgCommands,
    ) -> Result<String, CliError> {
        let mut out = Vec::new();
        OrgCommand::new(client, ctx)
            .execute(&mut out, &OutputFormat::new(format), command)
            .await?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[tokio::test]
    async fn list_shows_enterprise_orgs_only() {
        let client = MockConsoleClient::new();
        let mut ctx = SelectionContext::new(MemoryStore::new());
        let output = run(&client, &mut ctx, Format::Json, &OrgCommands::List).await.expect("list");

        let orgs: Vec<serde_json::Value> = serde_json::from_str(&output).expect("json");
        let codes: Vec<&str> = orgs.iter().filter_map(|o| o["code"].as_str()).collect();
        assert_eq!(codes, ["ACME", "GLOBEX"]);
    }

    #[tokio::test]
    async fn select_by_code_clears_descendants() {
        let client = MockConsoleClient::new();
        let mut ctx = SelectionContext::new(MemoryStore::new());
        run(&client, &mut ctx, Format::Table, &OrgCommands::Select { org: "ACME".into() }).await
            .expect("select");
        ctx.select(&Project {
            id: "p1".into(),
            name: "shop".into(),
            title: "Shop".into(),
            org_id: "1".into(),
        })
        .expect("project");

        let output = run(&client, &mut ctx, Format::Table, &OrgCommands::Select { org: "2".into() }).await
            .expect("reselect");

        assert!(output.contains("✓ Org selected Globex"));
        assert_eq!(ctx.id(Level::Org).as_deref(), Some("2"));
        assert_eq!(ctx.state(), SelectionState::OrgOnly);
    }

    #[tokio::test]
    async fn non_enterprise_org_cannot_be_selected() {
        let client = MockConsoleClient::new();
        let mut ctx = SelectionContext::new(MemoryStore::new());
        let err = run(&client, &mut ctx, Format::Table, &OrgCommands::Select { org: "DEV".into() }).await
            .expect_err("not found");

        assert!(matches!(
            err,
            CliError::Selection(TenancyError::NotFound { level: Level::Org, .. })
        ));
        assert_eq!(ctx.state(), SelectionState::Empty);
    }

    #[tokio::test]
    async fn remote_failure_is_reported_unchanged() {
        let client = MockConsoleClient {
            fail_with: Some("401 Unauthorized: token expired".into()),
            ..MockConsoleClient::new()
        };
        let mut ctx = SelectionContext::new(MemoryStore::new());
        let err = run(&client, &mut ctx, Format::Table, &OrgCommands::List).await.expect_err("remote");
        assert_eq!(err.to_string(), "401 Unauthorized: token expired");
    }
}
