//! Installer that records what it would do instead of doing it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use envboot_core::{Context, Error, Installer, Result};
use envboot_package::{InstallMethod, InstallationResult, Package};
use envboot_system::{SystemInfo, is_method_compatible};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub operation: &'static str,
    pub package: String,
    /// Command line that a real backend would run.
    pub command: String,
}

/// Dry-run backend for a given machine.
///
/// Tracks which packages it has "installed" so repeated installs and
/// removals of unknown packages fail the same way a real backend would.
#[derive(Debug)]
pub struct DryRunInstaller {
    system: SystemInfo,
    installed: Mutex<Vec<Package>>,
    actions: Mutex<Vec<Action>>,
}

impl DryRunInstaller {
    pub fn new(system: SystemInfo) -> Self {
        Self {
            system,
            installed: Mutex::new(Vec::new()),
            actions: Mutex::new(Vec::new()),
        }
    }

    /// Recorded operations in call order.
    pub fn actions(&self) -> Vec<Action> {
        lock(&self.actions).clone()
    }

    fn ensure_supported(&self, package: &Package, operation: &'static str) -> Result<()> {
        if is_method_compatible(&package.method, &self.system) {
            Ok(())
        } else {
            Err(Error::UnsupportedMethod {
                name: package.name.clone(),
                method: package.method.clone(),
                operation,
            })
        }
    }

    fn record(&self, operation: &'static str, package: &Package) -> String {
        let command = command_line(operation, package);
        lock(&self.actions).push(Action {
            operation,
            package: package.name.clone(),
            command: command.clone(),
        });
        command
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The command a real backend would run for `operation` ("install" or "remove").
pub fn command_line(operation: &str, package: &Package) -> String {
    let install = operation == "install";
    let source = &package.source;
    match &package.method {
        InstallMethod::Apt | InstallMethod::AptGet | InstallMethod::Dnf | InstallMethod::Yum
        | InstallMethod::Zypper => {
            let verb = if install { "install" } else { "remove" };
            format!("sudo {} {verb} -y {source}", package.method)
        }
        InstallMethod::Pacman => {
            let flag = if install { "-S" } else { "-R" };
            format!("sudo pacman {flag} --noconfirm {source}")
        }
        InstallMethod::Flatpak => {
            let verb = if install { "install" } else { "uninstall" };
            format!("flatpak {verb} -y {source}")
        }
        InstallMethod::Snap => format!("sudo snap {operation} {source}"),
        InstallMethod::Deb if install => format!("sudo apt install -y {source}"),
        InstallMethod::Rpm if install => format!("sudo dnf install -y {source}"),
        InstallMethod::Script if install => format!("curl -fsSL {source} | sh"),
        InstallMethod::AppImage | InstallMethod::Binary | InstallMethod::GitHubRelease
            if install =>
        {
            format!("download {source}")
        }
        method => format!("{method} {operation} {}", package.name),
    }
}

#[async_trait]
impl Installer for DryRunInstaller {
    async fn install(&self, ctx: &Context, package: &Package) -> Result<InstallationResult> {
        ctx.check()?;
        let started = Instant::now();
        self.ensure_supported(package, "install")?;
        {
            let mut installed = lock(&self.installed);
            if installed.iter().any(|p| p.name == package.name) {
                return Err(Error::AlreadyInstalled {
                    name: package.name.clone(),
                });
            }
            installed.push(package.clone());
        }
        let command = self.record("install", package);
        Ok(InstallationResult::succeeded(
            package.clone(),
            started.elapsed(),
            format!("would run: {command}"),
        ))
    }

    async fn remove(&self, ctx: &Context, package: &Package) -> Result<InstallationResult> {
        ctx.check()?;
        let started = Instant::now();
        self.ensure_supported(package, "remove")?;
        {
            let mut installed = lock(&self.installed);
            let Some(index) = installed.iter().position(|p| p.name == package.name) else {
                return Err(Error::NotInstalled {
                    name: package.name.clone(),
                });
            };
            installed.remove(index);
        }
        let command = self.record("remove", package);
        Ok(InstallationResult::succeeded(
            package.clone(),
            started.elapsed(),
            format!("would run: {command}"),
        ))
    }

    async fn list(&self, ctx: &Context) -> Result<Vec<Package>> {
        ctx.check()?;
        Ok(lock(&self.installed).clone())
    }

    async fn is_installed(&self, ctx: &Context, name: &str) -> Result<bool> {
        ctx.check()?;
        Ok(lock(&self.installed).iter().any(|p| p.name == name))
    }

    fn best_method(&self, source: &str) -> Result<InstallMethod> {
        let lower = source.to_ascii_lowercase();
        let method = if lower.ends_with(".appimage") {
            InstallMethod::AppImage
        } else if lower.ends_with(".deb") {
            InstallMethod::Deb
        } else if lower.ends_with(".rpm") {
            InstallMethod::Rpm
        } else if lower.ends_with(".sh") {
            InstallMethod::Script
        } else if lower.starts_with("https://github.com/") {
            InstallMethod::GitHubRelease
        } else if lower.contains("://") {
            InstallMethod::Binary
        } else {
            return self
                .system
                .package_manager
                .as_ref()
                .map(|manager| manager.method.clone())
                .ok_or(Error::NoPackageManager);
        };
        Ok(method)
    }
}
