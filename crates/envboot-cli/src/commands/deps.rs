//! Deps command implementation

use std::path::Path;

use colored::Colorize;
use envboot_core::Error;
use envboot_graph::DependencyGraph;

use super::load_manifest;
use crate::error::Result;

/// Run the deps command
pub fn run_deps(manifest_path: &Path, name: &str) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let graph = DependencyGraph::from_packages(&manifest.packages);
    if !graph.contains(name) {
        return Err(Error::PackageNotFound {
            name: name.to_string(),
        }
        .into());
    }

    let dependencies = graph.all_dependencies(name);
    println!("{} {}", "Dependencies of".bold(), name.cyan());
    if dependencies.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for dependency in &dependencies {
        if graph.contains(dependency) {
            println!("  {} {}", "+".green(), dependency.cyan());
        } else {
            println!(
                "  {} {} {}",
                "?".yellow(),
                dependency.cyan(),
                "(not in manifest)".dimmed()
            );
        }
    }
    Ok(())
}
