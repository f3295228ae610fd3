//! System command implementation

use colored::Colorize;
use envboot_core::{Context, SystemDetector};
use envboot_package::InstallMethod;
use envboot_system::{SystemInfo, method_priority, rank_methods};
use serde_json::json;

use crate::error::Result;

/// Install methods usable on `system`, best first.
pub fn supported_methods(system: &SystemInfo) -> Vec<InstallMethod> {
    rank_methods(InstallMethod::KNOWN.iter(), system)
}

/// Run the system command
pub async fn run_system(detector: &dyn SystemDetector, json: bool) -> Result<()> {
    let system = detector.detect_system(&Context::background()).await?;
    let methods = supported_methods(&system);

    if json {
        let output = json!({
            "system": system,
            "immutable": system.is_immutable(),
            "methods": methods.iter().map(InstallMethod::as_str).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let unknown = || "unknown".dimmed().to_string();
    println!("{}", "System".bold());
    println!();
    println!("{}:           {}/{}", "OS".dimmed(), system.os, system.arch);
    match &system.distribution {
        Some(d) => {
            let immutable = if d.is_immutable() { " (immutable)" } else { "" };
            println!(
                "{}:   {} {} [{}]{}",
                "Distribution".dimmed(),
                d.name.cyan(),
                d.version,
                d.family,
                immutable
            );
        }
        None => println!("{}:   {}", "Distribution".dimmed(), unknown()),
    }
    match &system.desktop {
        Some(de) => println!("{}:        {} ({:?})", "Desktop".dimmed(), de.name.cyan(), de.session),
        None => println!("{}:        {}", "Desktop".dimmed(), unknown()),
    }
    match &system.package_manager {
        Some(pm) => println!("{}: {}", "Package manager".dimmed(), pm.name.cyan()),
        None => println!("{}: {}", "Package manager".dimmed(), unknown()),
    }
    println!();

    println!("{}:", "Supported methods".bold());
    for method in &methods {
        println!(
            "  {:>3}  {}",
            method_priority(method, &system),
            method.as_str().cyan()
        );
    }
    Ok(())
}
