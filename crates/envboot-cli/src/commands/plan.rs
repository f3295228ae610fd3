//! Plan command implementation

use std::path::Path;

use colored::Colorize;
use envboot_core::Error;
use envboot_graph::DependencyGraph;
use envboot_package::{Manifest, Package};
use serde_json::json;

use super::load_manifest;
use crate::error::Result;

/// Install order for `target`, or for every package when `None`.
///
/// Unlike the graph, an unknown target is an error here: it is almost
/// always a typo on the command line.
pub fn plan<'m>(manifest: &'m Manifest, target: Option<&str>) -> Result<Vec<&'m Package>> {
    let graph = DependencyGraph::from_packages(&manifest.packages);
    let order = match target {
        Some(name) if !graph.contains(name) => {
            return Err(Error::PackageNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Some(name) => graph.resolve(name).map_err(Error::from)?,
        None => graph.resolve_all().map_err(Error::from)?,
    };
    Ok(order
        .iter()
        .filter_map(|name| graph.package(name))
        .collect())
}

/// Run the plan command
pub fn run_plan(manifest_path: &Path, target: Option<&str>, json: bool) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let order = plan(&manifest, target)?;

    if json {
        let output = json!({
            "target": target,
            "order": order.iter().map(|p| json!({
                "name": p.name,
                "method": p.method.as_str(),
                "source": p.source,
                "version": p.version,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match target {
        Some(name) => println!("{} {}", "Install plan for".bold(), name.cyan()),
        None => println!("{}", "Install plan".bold()),
    }
    if order.is_empty() {
        println!("  {}", "Nothing to install".dimmed());
    }
    for (step, package) in order.iter().enumerate() {
        let version = if package.is_latest() {
            String::new()
        } else {
            format!(" {}", package.version)
        };
        println!(
            "  {:>3}. {}{} {}",
            step + 1,
            package.name.cyan(),
            version,
            format!("({}: {})", package.method, package.source).dimmed()
        );
    }
    Ok(())
}
