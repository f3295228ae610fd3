//! Validating façade over the installer and detector ports.
//!
//! The service adds no state of its own: it checks the caller's context,
//! applies the package validation rule and forwards to the backend. Results
//! and errors from the backend are returned unchanged. Retries, rollback
//! and batch policy belong to the caller or the backend.

use std::future::Future;
use std::sync::Arc;

use envboot_package::{InstallMethod, InstallationResult, Package};
use envboot_system::SystemInfo;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::ports::{Installer, SystemDetector};

/// Entry point for package operations.
///
/// Safe to share across tasks as long as the injected ports are.
#[derive(Clone)]
pub struct PackageService {
    installer: Arc<dyn Installer>,
    detector: Arc<dyn SystemDetector>,
}

impl std::fmt::Debug for PackageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageService").finish_non_exhaustive()
    }
}

impl PackageService {
    pub fn new(installer: Arc<dyn Installer>, detector: Arc<dyn SystemDetector>) -> Self {
        Self {
            installer,
            detector,
        }
    }

    /// Install a package.
    ///
    /// Invalid packages fail with [`Error::InvalidPackage`] without reaching
    /// the installer.
    pub async fn install(&self, ctx: &Context, package: &Package) -> Result<InstallationResult> {
        ctx.check()?;
        validate(package)?;
        tracing::debug!(package = %package.name, method = %package.method, "Delegating install");
        until_done(ctx, self.installer.install(ctx, package)).await
    }

    /// Remove a package. Same validation gate as [`install`](Self::install).
    pub async fn remove(&self, ctx: &Context, package: &Package) -> Result<InstallationResult> {
        ctx.check()?;
        validate(package)?;
        tracing::debug!(package = %package.name, method = %package.method, "Delegating remove");
        until_done(ctx, self.installer.remove(ctx, package)).await
    }

    pub async fn list(&self, ctx: &Context) -> Result<Vec<Package>> {
        ctx.check()?;
        until_done(ctx, self.installer.list(ctx)).await
    }

    pub async fn is_installed(&self, ctx: &Context, name: &str) -> Result<bool> {
        ctx.check()?;
        until_done(ctx, self.installer.is_installed(ctx, name)).await
    }

    pub fn best_method(&self, source: &str) -> Result<InstallMethod> {
        self.installer.best_method(source)
    }

    pub async fn detect_system(&self, ctx: &Context) -> Result<SystemInfo> {
        ctx.check()?;
        until_done(ctx, self.detector.detect_system(ctx)).await
    }
}

fn validate(package: &Package) -> Result<()> {
    package.validate().map_err(|reason| {
        tracing::debug!(package = %package.name, %reason, "Rejected invalid package");
        Error::InvalidPackage {
            name: package.name.clone(),
            reason,
        }
    })
}

/// Run `work` unless the context finishes first.
async fn until_done<T, F>(ctx: &Context, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        reason = ctx.done() => Err(reason),
        result = work => result,
    }
}
