//! System detector backed by the running machine.
//!
//! Reads the os-release file, the XDG session variables and looks up known
//! package manager executables on `PATH`. Everything is captured when the
//! detector is built so tests can describe a machine explicitly.

use std::env;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use envboot_core::{Context, Error, Result, SystemDetector};
use envboot_system::os_release::OS_RELEASE_PATH;
use envboot_system::{
    DesktopEnvironment, Distribution, PackageManager, SystemInfo, is_method_compatible,
};

const OS_RELEASE_ENV: &str = "ENVBOOT_OS_RELEASE";

#[derive(Debug, Clone, Default)]
pub struct HostDetector {
    os_release: PathBuf,
    current_desktop: String,
    session_type: String,
    search_path: Vec<PathBuf>,
}

impl HostDetector {
    /// Detector for the current process environment.
    ///
    /// `ENVBOOT_OS_RELEASE` overrides the os-release location.
    pub fn from_env() -> Self {
        let os_release = env::var_os(OS_RELEASE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(OS_RELEASE_PATH));
        let search_path = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        Self::default()
            .with_os_release(os_release)
            .with_session(
                &env::var("XDG_CURRENT_DESKTOP").unwrap_or_default(),
                &env::var("XDG_SESSION_TYPE").unwrap_or_default(),
            )
            .with_search_path(search_path)
    }

    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn with_session(mut self, current_desktop: &str, session_type: &str) -> Self {
        self.current_desktop = current_desktop.to_string();
        self.session_type = session_type.to_string();
        self
    }

    pub fn with_search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = dirs;
        self
    }

    /// Known package managers whose executable is on the search path.
    pub fn available_managers(&self) -> Vec<PackageManager> {
        PackageManager::known()
            .into_iter()
            .filter(|manager| self.has_command(&manager.command))
            .collect()
    }

    fn has_command(&self, command: &str) -> bool {
        self.search_path
            .iter()
            .any(|dir| is_executable(&dir.join(command)))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[async_trait]
impl SystemDetector for HostDetector {
    async fn detect_system(&self, ctx: &Context) -> Result<SystemInfo> {
        let mut info = SystemInfo::current_platform();

        match self.detect_distribution(ctx).await {
            Ok(distribution) => info = info.with_distribution(distribution),
            Err(e) if e.is_cancellation() => return Err(e),
            Err(e) => tracing::debug!(error = %e, "Distribution not detected"),
        }

        match self.detect_desktop_environment(ctx).await {
            Ok(desktop) => info = info.with_desktop(desktop),
            Err(e) if e.is_cancellation() => return Err(e),
            Err(e) => tracing::debug!(error = %e, "Desktop environment not detected"),
        }

        // Prefer a manager that fits the distribution over the first one found.
        let available = self.available_managers();
        let manager = available
            .iter()
            .find(|manager| is_method_compatible(&manager.method, &info))
            .or(available.first())
            .cloned();
        if let Some(manager) = manager {
            info = info.with_package_manager(manager);
        }

        tracing::debug!(?info, "Detected system");
        Ok(info)
    }

    async fn detect_distribution(&self, ctx: &Context) -> Result<Distribution> {
        ctx.check()?;
        let content = tokio::fs::read_to_string(&self.os_release)
            .await
            .map_err(|e| Error::backend(format!("cannot read {}: {e}", self.os_release.display())))?;
        Distribution::from_os_release(&content)
            .ok_or_else(|| Error::backend(format!("no ID in {}", self.os_release.display())))
    }

    async fn detect_desktop_environment(&self, ctx: &Context) -> Result<DesktopEnvironment> {
        ctx.check()?;
        DesktopEnvironment::from_session(&self.current_desktop, &self.session_type)
            .ok_or(Error::NoDesktopEnvironment)
    }

    async fn detect_package_manager(&self, ctx: &Context) -> Result<PackageManager> {
        ctx.check()?;
        self.available_managers()
            .into_iter()
            .next()
            .ok_or(Error::NoPackageManager)
    }
}
