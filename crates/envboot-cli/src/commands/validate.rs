//! Validate command implementation

use std::path::Path;

use colored::Colorize;
use envboot_graph::DependencyGraph;
use envboot_package::{Manifest, ValidationError};

use super::load_manifest;
use crate::error::{CliError, Result};

/// Problems found in a manifest.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report<'m> {
    pub packages: usize,
    pub invalid: Vec<(&'m str, ValidationError)>,
    pub duplicates: Vec<&'m str>,
    /// `(dependent, dependency)` pairs naming packages the manifest lacks.
    pub missing: Vec<(&'m str, &'m str)>,
    pub cycle: Option<Vec<String>>,
}

impl Report<'_> {
    /// Invalid packages and cycles are errors; the rest are warnings.
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty() && self.cycle.is_none()
    }
}

/// Inspect a loaded manifest.
pub fn check(manifest: &Manifest) -> Report<'_> {
    let graph = DependencyGraph::from_packages(&manifest.packages);
    Report {
        packages: manifest.packages.len(),
        invalid: manifest
            .invalid_packages()
            .into_iter()
            .filter_map(|p| p.validate().err().map(|reason| (p.name.as_str(), reason)))
            .collect(),
        duplicates: manifest.duplicate_names(),
        missing: graph.missing_dependencies(),
        cycle: graph.find_cycle(),
    }
}

/// Run the validate command
pub fn run_validate(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let report = check(&manifest);

    println!(
        "{} {} ({} packages)",
        "Checking".bold(),
        manifest_path.display(),
        report.packages
    );

    for (name, reason) in &report.invalid {
        let name = if name.trim().is_empty() { "<unnamed>" } else { name };
        println!("  {} {}: {}", "x".red(), name.cyan(), reason);
    }
    for name in &report.duplicates {
        println!(
            "  {} {} is defined more than once (last definition wins)",
            "!".yellow(),
            name.cyan()
        );
    }
    for (name, dependency) in &report.missing {
        println!(
            "  {} {} depends on {}, which is not in the manifest",
            "!".yellow(),
            name.cyan(),
            dependency.cyan()
        );
    }
    if let Some(path) = &report.cycle {
        println!("  {} circular dependency: {}", "x".red(), path.join(" -> "));
    }

    if report.is_ok() {
        println!("{}", "Manifest is valid".green().bold());
        Ok(())
    } else {
        let problems = report.invalid.len() + usize::from(report.cycle.is_some());
        Err(CliError::user(format!(
            "{problems} problem(s) found in {}",
            manifest_path.display()
        )))
    }
}
