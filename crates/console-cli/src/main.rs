//! Console CLI binary entrypoint.
//!
//! This is the main entry point for the `console` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use console_cli::cli::{Cli, Commands};
use console_cli::commands::{
    ClearCommand, OpenCommand, OrgCommand, ProjectCommand, PublicKeyCommand, WhereCommand,
    WorkspaceCommand,
};
use console_cli::output::OutputFormat;
use console_cli::session;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), console_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut context = session::open_context(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    // Local commands never need the API.
    match &cli.command {
        Commands::Where => {
            return WhereCommand::new(&context).execute(&mut stdout, &format);
        }
        Commands::Clear { level } => {
            return ClearCommand::new(&mut context).execute(&mut stdout, &format, *level);
        }
        Commands::Open => {
            let cmd = OpenCommand::new(&context, cli.console_url.as_deref());
            return cmd.execute(&mut stdout, &format);
        }
        _ => {}
    }

    let client = session::http_client(&cli)?;
    match &cli.command {
        Commands::Org { command } => {
            let mut cmd = OrgCommand::new(&client, &mut context);
            cmd.execute(&mut stdout, &format, command).await?;
        }
        Commands::Project { command } => {
            let mut cmd = ProjectCommand::new(&client, &mut context);
            cmd.execute(&mut stdout, &format, command).await?;
        }
        Commands::Workspace { command } => {
            let mut cmd = WorkspaceCommand::new(&client, &mut context);
            cmd.execute(&mut stdout, &format, command).await?;
        }
        Commands::PublicKey { command } => {
            let cmd = PublicKeyCommand::new(&client, &context);
            cmd.execute(&mut stdout, &format, command).await?;
        }
        Commands::Where | Commands::Clear { .. } | Commands::Open => {}
    }

    Ok(())
}
