//! The package record and its validation rule.

use serde::{Deserialize, Serialize};

use crate::method::InstallMethod;

/// One installable unit.
///
/// A package is well-formed when its name, method and source are non-empty
/// after trimming. Version and dependencies never affect validity; an empty
/// version means "latest" and is passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Identifier used for dependency edges.
    #[serde(default)]
    pub name: String,
    /// Optional category tag (e.g., "dev", "media").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Mechanism used to install the package.
    #[serde(default)]
    pub method: InstallMethod,
    /// Method-specific locator: a package name, a URL, or `owner/repo`.
    #[serde(default)]
    pub source: String,
    /// Free-form version string. Empty means latest.
    #[serde(default)]
    pub version: String,
    /// Names of packages that must be installed first, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// The first field that makes a package invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("package name is empty")]
    EmptyName,
    #[error("install method is empty")]
    EmptyMethod,
    #[error("package source is empty")]
    EmptySource,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        method: impl Into<InstallMethod>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: None,
            description: String::new(),
            method: method.into(),
            source: source.into(),
            version: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the package tracks the latest available version.
    pub fn is_latest(&self) -> bool {
        self.version.trim().is_empty()
    }

    /// Check the validation rule, naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.method.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyMethod);
        }
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptySource);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Validation over a possibly absent package. Absent packages are invalid.
pub fn is_valid(package: Option<&Package>) -> bool {
    package.is_some_and(Package::is_valid)
}
