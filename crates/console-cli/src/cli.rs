//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use console_tenancy::{Level, Overrides};

/// Console CLI - select Organizations, Projects and Workspaces and manage
/// their certificate bindings.
#[derive(Parser, Debug, Clone)]
#[command(name = "console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Selection state file [default: <config dir>/console/config.json].
    #[arg(long, env = "CONSOLE_CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the console API.
    #[arg(long, env = "CONSOLE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Access token sent as a bearer token.
    #[arg(long, env = "CONSOLE_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// API key sent as `x-api-key`.
    #[arg(long, env = "CONSOLE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the web console, used by `open`.
    #[arg(long, env = "CONSOLE_WEB_URL", global = true)]
    pub console_url: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Organization commands.
    Org {
        /// Organization subcommand to execute.
        #[command(subcommand)]
        command: OrgCommands,
    },

    /// Project commands.
    Project {
        /// Project subcommand to execute.
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Workspace commands.
    #[command(visible_alias = "ws")]
    Workspace {
        /// Workspace subcommand to execute.
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// Public key certificate bindings of a Workspace.
    #[command(name = "publickey", visible_alias = "key")]
    PublicKey {
        /// Public key subcommand to execute.
        #[command(subcommand)]
        command: PublicKeyCommands,
    },

    /// Show the selected Organization, Project and Workspace.
    Where,

    /// Clear the selection.
    ///
    /// Clearing a level also clears every level below it.
    Clear {
        /// Level to clear (org, project or workspace). Clears everything
        /// when omitted.
        level: Option<Level>,
    },

    /// Print the web console URL for the current selection.
    Open,
}

/// Organization subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum OrgCommands {
    /// List enterprise Organizations.
    #[command(visible_alias = "ls")]
    List,

    /// Select an Organization by id or code.
    #[command(visible_alias = "sel")]
    Select {
        /// Organization id or code.
        org: String,
    },
}

/// Project subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommands {
    /// List Projects of the selected Organization.
    #[command(visible_alias = "ls")]
    List {
        /// Organization id to list Projects of.
        #[arg(long)]
        org_id: Option<String>,
    },

    /// Select a Project by id or name.
    #[command(visible_alias = "sel")]
    Select {
        /// Project id or name.
        project: String,

        /// Organization id of the Project; selects that Organization too.
        #[arg(long)]
        org_id: Option<String>,
    },
}

/// Workspace subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceCommands {
    /// List Workspaces of the selected Project.
    #[command(visible_alias = "ls")]
    List {
        /// Organization id of the Project.
        #[arg(long)]
        org_id: Option<String>,

        /// Project id to list Workspaces of.
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Select a Workspace of the selected Project by id or name.
    #[command(visible_alias = "sel")]
    Select {
        /// Workspace id or name.
        workspace: String,
    },

    /// Download the configuration of the selected Workspace.
    #[command(visible_alias = "dl")]
    Download {
        /// Directory to write the file to [default: current directory].
        destination: Option<PathBuf>,

        /// Ids overriding the selection.
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Public key subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum PublicKeyCommands {
    /// List certificate bindings of the Workspace.
    #[command(visible_alias = "ls")]
    List {
        /// Ids overriding the selection.
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Upload a certificate and bind it, unless it is already bound.
    Upload {
        /// Path to the certificate file (PEM or DER).
        file: PathBuf,

        /// Ids overriding the selection.
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Delete a binding by binding id or certificate fingerprint.
    #[command(visible_alias = "rm")]
    Delete {
        /// Binding id or certificate fingerprint.
        id_or_fingerprint: String,

        /// Ids overriding the selection.
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Explicit ids taking precedence over the stored selection.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeArgs {
    /// Organization id.
    #[arg(long)]
    pub org_id: Option<String>,

    /// Project id.
    #[arg(long)]
    pub project_id: Option<String>,

    /// Workspace id.
    #[arg(long)]
    pub workspace_id: Option<String>,
}

impl From<&ScopeArgs> for Overrides {
    fn from(args: &ScopeArgs) -> Self {
        Self {
            org_id: args.org_id.clone(),
            project_id: args.project_id.clone(),
            workspace_id: args.workspace_id.clone(),
        }
    }
}
