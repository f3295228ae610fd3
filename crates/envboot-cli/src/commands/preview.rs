//! Preview command implementation
//!
//! Walks the install plan through [`PackageService`] backed by the dry-run
//! installer. Packages whose dependencies failed are not attempted.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use envboot_core::{Context, Error, PackageService, SystemDetector, format_error_message};
use envboot_package::Manifest;

use super::load_manifest;
use super::plan::plan;
use crate::dry_run::DryRunInstaller;
use crate::error::{CliError, Result};

/// Outcome of a preview run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Preview {
    /// `(package, output)` for every package that would install.
    pub installed: Vec<(String, String)>,
    /// `(package, formatted error)` for every package that would fail.
    pub failed: Vec<(String, String)>,
}

/// Attempt every package of the plan in order.
///
/// Cancellation aborts the walk; any other failure is recorded and the walk
/// continues with packages that do not depend on the failed one.
pub async fn preview(
    service: &PackageService,
    ctx: &Context,
    manifest: &Manifest,
    target: Option<&str>,
    verbose: bool,
) -> Result<Preview> {
    let order = plan(manifest, target)?;
    tracing::info!(packages = order.len(), "Previewing install plan");

    let mut outcome = Preview::default();
    let mut failed: HashSet<&str> = HashSet::new();
    for package in order {
        let blocked_by = package
            .dependencies
            .iter()
            .find(|dep| failed.contains(dep.as_str()));
        let result = match blocked_by {
            Some(dependency) => Err(Error::DependencyMissing {
                name: package.name.clone(),
                dependency: dependency.clone(),
            }),
            None => service.install(ctx, package).await,
        };

        match result {
            Ok(result) => outcome.installed.push((package.name.clone(), result.output)),
            Err(e) if e.is_cancellation() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(package = %package.name, error = %e, "Would fail");
                failed.insert(package.name.as_str());
                let message = format_error_message(Some(&e), Some(&package.name), verbose);
                outcome.failed.push((package.name.clone(), message));
            }
        }
    }
    Ok(outcome)
}

/// Run the preview command
pub async fn run_preview(
    manifest_path: &Path,
    target: Option<&str>,
    timeout: Option<u64>,
    verbose: bool,
    detector: Arc<dyn SystemDetector>,
) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let mut ctx = Context::background();
    if let Some(seconds) = timeout {
        ctx = ctx.with_timeout(Duration::from_secs(seconds));
    }

    let system = detector.detect_system(&ctx).await?;
    let installer = Arc::new(DryRunInstaller::new(system));
    let service = PackageService::new(installer.clone(), detector);

    let outcome = preview(&service, &ctx, &manifest, target, verbose).await?;

    println!("{} {}", "Preview".bold(), "(nothing is changed)".dimmed());
    for (name, output) in &outcome.installed {
        println!("  {} {} {}", "✓".green(), name.cyan(), output.dimmed());
    }
    for (_, message) in &outcome.failed {
        println!("  {}", message.red());
    }
    if verbose {
        println!();
        println!("{}:", "Recorded actions".bold());
        for action in installer.actions() {
            println!("  {} {}: {}", action.operation, action.package.cyan(), action.command);
        }
    }

    if outcome.failed.is_empty() {
        println!(
            "{} {} package(s) ready to install",
            "OK".green().bold(),
            outcome.installed.len()
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} package(s) would fail",
            outcome.failed.len(),
            outcome.failed.len() + outcome.installed.len()
        )))
    }
}
