//! Outcome of an install or remove performed by a backend.

use std::time::Duration;

use crate::package::Package;

/// What a backend reports after acting on a package.
///
/// Produced by installer backends; the service layer forwards it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationResult {
    pub package: Package,
    pub success: bool,
    /// Backend error text when `success` is false.
    pub error: Option<String>,
    pub duration: Duration,
    /// Captured backend output.
    pub output: String,
}

impl InstallationResult {
    pub fn succeeded(package: Package, duration: Duration, output: impl Into<String>) -> Self {
        Self {
            package,
            success: true,
            error: None,
            duration,
            output: output.into(),
        }
    }

    pub fn failed(package: Package, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            package,
            success: false,
            error: Some(error.into()),
            duration,
            output: String::new(),
        }
    }
}
