//! Commands over the stored selection alone: `where`, `clear` and `open`.

use std::io::Write;

use console_config::SelectionStore;
use console_tenancy::{console_url, Level, Project, SelectionContext, Workspace};

use crate::error::CliError;
use crate::output::{Message, OutputFormat};

/// Shows the current selection.
pub struct WhereCommand<'a, S> {
    context: &'a SelectionContext<S>,
}

impl<'a, S: SelectionStore> WhereCommand<'a, S> {
    /// Creates a new where command handler.
    #[must_use]
    pub const fn new(context: &'a SelectionContext<S>) -> Self {
        Self { context }
    }

    /// Writes the selected Organization, Project and Workspace names.
    ///
    /// # Errors
    ///
    /// Returns error if writing fails.
    pub fn execute<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        format.write(out, &self.context.describe())
    }
}

/// Clears a level of the selection, or all of it.
pub struct ClearCommand<'a, S> {
    context: &'a mut SelectionContext<S>,
}

impl<'a, S: SelectionStore> ClearCommand<'a, S> {
    /// Creates a new clear command handler.
    #[must_use]
    pub fn new(context: &'a mut SelectionContext<S>) -> Self {
        Self { context }
    }

    /// Clears `level` and everything below it, or the whole selection.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        level: Option<Level>,
    ) -> Result<(), CliError> {
        let message = match level {
            Some(level) => {
                self.context.clear(level)?;
                format!("Cleared {} selection", level.label())
            }
            None => {
                self.context.clear_all()?;
                "Cleared selection".to_string()
            }
        };
        if !format.is_json() {
            format.write(out, &Message::success(message))?;
        }
        format.write(out, &self.context.describe())
    }
}

/// Prints the web console URL of the selected Project and Workspace.
pub struct OpenCommand<'a, S> {
    context: &'a SelectionContext<S>,
    base_url: Option<&'a str>,
}

impl<'a, S: SelectionStore> OpenCommand<'a, S> {
    /// Creates a new open command handler.
    #[must_use]
    pub const fn new(context: &'a SelectionContext<S>, base_url: Option<&'a str>) -> Self {
        Self { context, base_url }
    }

    /// Writes the URL.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if no console URL is configured, or an
    /// error if the stored selection is unreadable.
    pub fn execute<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let base = self.base_url.filter(|url| !url.is_empty()).ok_or_else(|| {
            CliError::Config("no console URL configured; pass --console-url or set CONSOLE_WEB_URL".into())
        })?;
        let project = self.context.get::<Project>()?;
        let workspace = self.context.get::<Workspace>()?;
        let url = console_url(base, project.as_ref(), workspace.as_ref());
        format.write(out, &Message::info(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use console_config::MemoryStore;
    use console_tenancy::{Organization, SelectionState};
    use test_case::test_case;

    fn full_selection() -> SelectionContext<MemoryStore> {
        let mut ctx = SelectionContext::new(MemoryStore::new());
        ctx.select(&Organization {
            id: "1".into(),
            code: "ACME".into(),
            name: "Acme".into(),
            org_type: None,
        })
        .expect("org");
        ctx.select(&Project {
            id: "p1".into(),
            name: "shop".into(),
            title: "Shop".into(),
            org_id: "1".into(),
        })
        .expect("project");
        ctx.select(&Workspace {
            id: "w1".into(),
            name: "Stage".into(),
        })
        .expect("workspace");
        ctx
    }

    fn table() -> OutputFormat {
        OutputFormat::new(Format::Table)
    }

    #[test]
    fn where_on_empty_selection() {
        let ctx = SelectionContext::new(MemoryStore::new());
        let mut out = Vec::new();
        WhereCommand::new(&ctx).execute(&mut out, &table()).expect("where");
        let output = String::from_utf8(out).expect("utf8");
        assert_eq!(output.matches("Not Selected").count(), 3);
    }

    #[test]
    fn where_as_json() {
        let ctx = full_selection();
        let mut out = Vec::new();
        WhereCommand::new(&ctx)
            .execute(&mut out, &OutputFormat::new(Format::Json))
            .expect("where");
        let parsed: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed["org"], "Acme");
        assert_eq!(parsed["project"], "shop");
        assert_eq!(parsed["workspace"], "Stage");
    }

    #[test_case(Some(Level::Workspace), SelectionState::OrgProject ; "workspace")]
    #[test_case(Some(Level::Project), SelectionState::OrgOnly ; "project and below")]
    #[test_case(Some(Level::Org), SelectionState::Empty ; "org and below")]
    #[test_case(None, SelectionState::Empty ; "everything")]
    fn clear_cascades(level: Option<Level>, expected: SelectionState) {
        let mut ctx = full_selection();
        let mut out = Vec::new();
        ClearCommand::new(&mut ctx)
            .execute(&mut out, &table(), level)
            .expect("clear");
        assert_eq!(ctx.state(), expected);
        assert!(String::from_utf8(out).expect("utf8").contains("✓ Cleared"));
    }

    #[test]
    fn open_prints_workspace_url() {
        let ctx = full_selection();
        let mut out = Vec::new();
        OpenCommand::new(&ctx, Some("https://console.example/"))
            .execute(&mut out, &table())
            .expect("open");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "https://console.example/1/p1/workspaces/w1/details\n"
        );
    }

    #[test]
    fn open_without_project_prints_base() {
        let ctx = SelectionContext::new(MemoryStore::new());
        let mut out = Vec::new();
        OpenCommand::new(&ctx, Some("https://console.example"))
            .execute(&mut out, &table())
            .expect("open");
        assert_eq!(String::from_utf8(out).expect("utf8"), "https://console.example\n");
    }

    #[test]
    fn open_requires_console_url() {
        let ctx = full_selection();
        let mut out = Vec::new();
        let err = OpenCommand::new(&ctx, None)
            .execute(&mut out, &table())
            .expect_err("no url");
        assert!(matches!(err, CliError::Config(_)));
    }
}
