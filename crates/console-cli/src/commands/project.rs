//! Project command implementation.

use std::io::Write;

use console_config::SelectionStore;
use console_tenancy::{
    enterprise_only, find_by_key, ContextGate, Level, Overrides, SelectionContext,
};
use tracing::{debug, info};

use crate::cli::ProjectCommands;
use crate::client::ConsoleClient;
use crate::error::CliError;
use crate::output::OutputFormat;

use super::report_selection;

/// Handler for project subcommands.
pub struct ProjectCommand<'a, C, S> {
    client: &'a C,
    context: &'a mut SelectionContext<S>,
}

impl<'a, C: ConsoleClient, S: SelectionStore> ProjectCommand<'a, C, S> {
    /// Creates a new project command handler.
    #[must_use]
    pub fn new(client: &'a C, context: &'a mut SelectionContext<S>) -> Self {
        Self { client, context }
    }

    /// Executes the project subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if no Organization is selected or given, or the
    /// command fails.
    pub async fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &ProjectCommands,
    ) -> Result<(), CliError> {
        match command {
            ProjectCommands::List { org_id } => self.list(out, format, org_id.clone()).await,
            ProjectCommands::Select { project, org_id } => {
                self.select(out, format, project, org_id.as_deref()).await
            }
        }
    }

    async fn list<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        org_id: Option<String>,
    ) -> Result<(), CliError> {
        let overrides = Overrides {
            org_id,
            ..Overrides::default()
        };
        let org_id = ContextGate::with_overrides(self.context, overrides).require_org()?;
        debug!(org_id = %org_id, "listing projects");
        let projects = self.client.list_projects(&org_id).await?;
        format.write(out, &projects)
    }

    async fn select<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        key: &str,
        org_override: Option<&str>,
    ) -> Result<(), CliError> {
        let org_override = org_override.filter(|id| !id.is_empty());
        let switch_org = org_override
            .filter(|id| self.context.id(Level::Org).as_deref() != Some(*id));

        if let Some(org_key) = switch_org {
            // Both lookups succeed before the single write.
            let orgs = enterprise_only(self.client.list_organizations().await?);
            let org = find_by_key(&orgs, org_key)?;
            let projects = self.client.list_projects(&org.id).await?;
            let project = find_by_key(&projects, key)?;

            info!(org_id = %org.id, "switching organization for project selection");
            self.context.select_org_and_project(org, project)?;
            let message = format!("Project selected : {}", project.title);
            return report_selection(out, format, self.context, message);
        }

        let org_id = ContextGate::new(self.context).require_org()?;
        let projects = self.client.list_projects(&org_id).await?;
        let project = find_by_key(&projects, key)?;
        self.context.select(project)?;
        report_selection(
            out,
            format,
            self.context,
            format!("Project selected : {}", project.title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::testing::MockConsoleClient;
    use console_config::{ConfigError, MemoryStore};
    use console_tenancy::{SelectionState, TenancyError, Workspace};
    use serde_json::Value;

    /// Store that accepts a fixed number of writes, then fails.
    struct LimitedStore {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl LimitedStore {
        fn take_write(&mut self, path: &str) -> console_config::Result<()> {
            if self.writes_left == 0 {
                return Err(ConfigError::InvalidPath(path.to_string()));
            }
            self.writes_left -= 1;
            Ok(())
        }
    }

    impl SelectionStore for LimitedStore {
        fn get(&self, path: &str) -> Option<Value> {
            self.inner.get(path)
        }

        fn set(&mut self, path: &str, value: Value) -> console_config::Result<()> {
            self.take_write(path)?;
            self.inner.set(path, value)
        }

        fn delete(&mut self, path: &str) -> console_config::Result<()> {
            self.take_write(path)?;
            self.inner.delete(path)
        }
    }

    async fn run(
        client: &MockConsoleClient,
        ctx: &mut SelectionContext<MemoryStore>,
        command: &ProjectCommands,
    ) -> Result<String, CliError> {
        let mut out = Vec::new();
        ProjectCommand::new(client, ctx)
            .execute(&mut out, &OutputFormat::new(Format::Table), command)
            .await?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    fn select(project: &str, org_id: Option<&str>) -> ProjectCommands {
        ProjectCommands::Select {
            project: project.into(),
            org_id: org_id.map(str::to_string),
        }
    }

    fn acme_selected(client: &MockConsoleClient) -> SelectionContext<MemoryStore> {
        let mut ctx = SelectionContext::new(MemoryStore::new());
        ctx.select(&client.orgs[0]).expect("org");
        ctx
    }

    #[tokio::test]
    async fn list_without_org_fails_before_remote_call() {
        let client = MockConsoleClient::new();
        let mut ctx = SelectionContext::new(MemoryStore::new());

        let err = run(&client, &mut ctx, &ProjectCommands::List { org_id: None })
            .await
            .expect_err("gate");

        assert!(matches!(
            err,
            CliError::Selection(TenancyError::MissingSelection(Level::Org))
        ));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn list_uses_selected_org() {
        let client = MockConsoleClient::new();
        let mut ctx = acme_selected(&client);

        let output = run(&client, &mut ctx, &ProjectCommands::List { org_id: None })
            .await
            .expect("list");

        assert!(output.contains("shop"));
        assert!(!output.contains("blog"));
    }

    #[tokio::test]
    async fn list_with_org_override_needs_no_selection() {
        let client = MockConsoleClient::new();
        let mut ctx = SelectionContext::new(MemoryStore::new());

        let output = run(
            &client,
            &mut ctx,
            &ProjectCommands::List {
                org_id: Some("2".into()),
            },
        )
        .await
        .expect("list");

        assert!(output.contains("blog"));
        assert_eq!(ctx.state(), SelectionState::Empty);
    }

    #[tokio::test]
    async fn select_clears_workspace() {
        let client = MockConsoleClient::new();
        let mut ctx = acme_selected(&client);
        ctx.select(&client.projects[0]).expect("project");
        ctx.select(&Workspace {
            id: "w1".into(),
            name: "Production".into(),
        })
        .expect("workspace");

        let output = run(&client, &mut ctx, &select("shop", None)).await.expect("select");

        assert!(output.contains("✓ Project selected : Shop"));
        assert!(output.contains("Workspace:      Not Selected"));
        assert_eq!(ctx.state(), SelectionState::OrgProject);
    }

    #[tokio::test]
    async fn select_with_other_org_switches_org_first() {
        let client = MockConsoleClient::new();
        let mut ctx = acme_selected(&client);

        run(&client, &mut ctx, &select("blog", Some("2"))).await.expect("select");

        assert_eq!(ctx.id(Level::Org).as_deref(), Some("2"));
        assert_eq!(ctx.id(Level::Project).as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn unknown_project_leaves_selection_untouched() {
        let client = MockConsoleClient::new();
        let mut ctx = acme_selected(&client);

        let err = run(&client, &mut ctx, &select("nope", Some("2")))
            .await
            .expect_err("not found");

        assert!(matches!(
            err,
            CliError::Selection(TenancyError::NotFound {
                level: Level::Project,
                ..
            })
        ));
        assert_eq!(ctx.id(Level::Org).as_deref(), Some("1"));
        assert_eq!(ctx.state(), SelectionState::OrgOnly);
    }

    #[tokio::test]
    async fn org_switch_is_written_once() {
        let client = MockConsoleClient::new();
        let mut seeded = acme_selected(&client);
        seeded.select(&client.projects[0]).expect("project");
        let mut ctx = SelectionContext::new(LimitedStore {
            inner: seeded.into_store(),
            writes_left: 1,
        });

        let mut out = Vec::new();
        ProjectCommand::new(&client, &mut ctx)
            .execute(&mut out, &OutputFormat::new(Format::Json), &select("blog", Some("2")))
            .await
            .expect("select");

        assert_eq!(ctx.id(Level::Org).as_deref(), Some("2"));
        assert_eq!(ctx.id(Level::Project).as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn failed_org_switch_keeps_previous_selection() {
        let client = MockConsoleClient::new();
        let mut seeded = acme_selected(&client);
        seeded.select(&client.projects[0]).expect("project");
        let mut ctx = SelectionContext::new(LimitedStore {
            inner: seeded.into_store(),
            writes_left: 0,
        });

        let mut out = Vec::new();
        let err = ProjectCommand::new(&client, &mut ctx)
            .execute(&mut out, &OutputFormat::new(Format::Table), &select("blog", Some("2")))
            .await
            .expect_err("write fails");

        assert!(matches!(err, CliError::Store(_)));
        assert_eq!(ctx.id(Level::Org).as_deref(), Some("1"));
        assert_eq!(ctx.id(Level::Project).as_deref(), Some("p1"));
    }
}
