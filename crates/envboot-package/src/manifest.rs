//! Declarative package manifests (`envboot.toml`).
//!
//! # Example TOML
//!
//! ```toml
//! [[package]]
//! name = "nginx"
//! group = "web"
//! description = "HTTP server"
//! method = "apt"
//! source = "nginx"
//! dependencies = ["openssl"]
//!
//! [[package]]
//! name = "openssl"
//! method = "apt"
//! source = "openssl"
//! ```
//!
//! Loading never rejects a package for being malformed; callers inspect
//! [`Manifest::invalid_packages`] and decide.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::package::Package;

/// A set of packages loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default, rename = "package")]
    pub packages: Vec<Package>,
}

impl Manifest {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        tracing::debug!(packages = manifest.packages.len(), "Parsed package manifest");
        Ok(manifest)
    }

    /// Read and parse a manifest from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize the manifest back to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ManifestSerialize(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.iter().rev().find(|p| p.name == name)
    }

    /// Packages failing the validation rule, in declaration order.
    pub fn invalid_packages(&self) -> Vec<&Package> {
        self.packages.iter().filter(|p| !p.is_valid()).collect()
    }

    /// Names declared more than once, in order of their second appearance.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for pkg in &self.packages {
            let name = pkg.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Packages carrying the given group tag.
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Package> + 'a {
        self.packages
            .iter()
            .filter(move |p| p.group.as_deref() == Some(group))
    }
}
