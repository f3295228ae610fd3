//! Package records for envboot.
//!
//! A [`Package`] describes one installable unit: what it is called, which
//! [`InstallMethod`] installs it, where that method finds it, and which other
//! packages must be present first. Packages are usually declared in a TOML
//! [`Manifest`].

pub mod error;
pub mod manifest;
pub mod method;
pub mod package;
pub mod result;

/// Default manifest filename looked up by the CLI.
pub const MANIFEST_FILENAME: &str = "envboot.toml";

pub use error::{Error, Result};
pub use manifest::Manifest;
pub use method::InstallMethod;
pub use package::{Package, ValidationError, is_valid};
pub use result::InstallationResult;
