//! Command implementations for envboot-cli

pub mod deps;
pub mod explain;
pub mod plan;
pub mod preview;
pub mod system;
pub mod validate;

use std::path::Path;

use envboot_package::Manifest;

use crate::error::Result;

pub use deps::run_deps;
pub use explain::run_explain;
pub use plan::run_plan;
pub use preview::run_preview;
pub use system::run_system;
pub use validate::run_validate;

/// Load the manifest every command works on.
pub(crate) fn load_manifest(path: &Path) -> Result<Manifest> {
    let manifest = Manifest::from_path(path)?;
    tracing::info!(path = %path.display(), packages = manifest.packages.len(), "Loaded manifest");
    Ok(manifest)
}
