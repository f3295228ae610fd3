//! envboot CLI
//!
//! Plans, checks and previews the packages a fresh machine needs.

mod cli;
mod commands;
mod dry_run;
mod error;
mod host;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};
use host::HostDetector;

/// Environment variable holding the log filter when not verbose.
const LOG_ENV: &str = "ENVBOOT_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.manifest, cli.verbose),
        None => {
            println!("{} environment bootstrapper", "envboot".green().bold());
            println!();
            println!("Run {} for available commands.", "envboot --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so command output stays machine-readable.
fn init_tracing(verbose: bool) -> Result<()> {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    } else {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
    }
    Ok(())
}

fn execute_command(cmd: Commands, manifest: &std::path::Path, verbose: bool) -> Result<()> {
    match cmd {
        Commands::Validate => commands::run_validate(manifest),
        Commands::Plan { target, json } => commands::run_plan(manifest, target.as_deref(), json),
        Commands::Deps { name } => commands::run_deps(manifest, &name),
        Commands::System { json } => {
            let detector = HostDetector::from_env();
            runtime()?.block_on(commands::run_system(&detector, json))
        }
        Commands::Preview { target, timeout } => {
            let detector = Arc::new(HostDetector::from_env());
            runtime()?.block_on(commands::run_preview(
                manifest,
                target.as_deref(),
                timeout,
                verbose,
                detector,
            ))
        }
        Commands::Explain { message, package } => {
            commands::run_explain(&message, package.as_deref(), verbose);
            Ok(())
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
