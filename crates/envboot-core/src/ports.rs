//! Traits implemented by backends.
//!
//! An [`Installer`] performs real system changes for one package manager;
//! a [`SystemDetector`] inspects the machine. Implementations must honor the
//! [`Context`] they are given and report failures with the matching
//! [`Error`](crate::Error) variant (`AlreadyInstalled`, `NetworkFailure`,
//! `InsufficientDiskSpace`, ...) so callers can match on the category.

use async_trait::async_trait;
use envboot_package::{InstallMethod, InstallationResult, Package};
use envboot_system::{DesktopEnvironment, Distribution, PackageManager, SystemInfo};

use crate::context::Context;
use crate::error::Result;

/// Backend that installs and removes packages.
///
/// Idempotency is the backend's job: a second install of the same package
/// should fail with `AlreadyInstalled` instead of repeating the work.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(&self, ctx: &Context, package: &Package) -> Result<InstallationResult>;

    async fn remove(&self, ctx: &Context, package: &Package) -> Result<InstallationResult>;

    /// Packages currently installed through this backend.
    async fn list(&self, ctx: &Context) -> Result<Vec<Package>>;

    async fn is_installed(&self, ctx: &Context, name: &str) -> Result<bool>;

    /// Preferred method for a source locator.
    fn best_method(&self, source: &str) -> Result<InstallMethod>;
}

/// Backend that describes the machine envboot runs on.
#[async_trait]
pub trait SystemDetector: Send + Sync {
    async fn detect_system(&self, ctx: &Context) -> Result<SystemInfo>;

    async fn detect_distribution(&self, ctx: &Context) -> Result<Distribution>;

    /// Fails with `NoDesktopEnvironment` when none is running.
    async fn detect_desktop_environment(&self, ctx: &Context) -> Result<DesktopEnvironment>;

    /// Fails with `NoPackageManager` when none is available.
    async fn detect_package_manager(&self, ctx: &Context) -> Result<PackageManager>;
}
