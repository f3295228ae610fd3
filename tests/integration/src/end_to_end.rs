//! End-to-end flow across the envboot crates
//!
//! manifest file -> dependency graph -> install plan -> ordered installs
//! through `PackageService`, plus host description -> method ranking.

use async_trait::async_trait;
use envboot_core::{
    Context, DependencyGraph, Error, Installer, PackageService, Result, SystemDetector,
};
use envboot_package::{InstallMethod, InstallationResult, Manifest, Package};
use envboot_system::{
    DesktopEnvironment, Distribution, PackageManager, SystemInfo, is_method_compatible,
    rank_methods,
};
use envboot_test_utils::{position, webapp_stack};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Installer that records install order and refuses repeats.
#[derive(Default)]
struct RecordingInstaller {
    log: Mutex<Vec<String>>,
}

impl RecordingInstaller {
    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Installer for RecordingInstaller {
    async fn install(&self, _ctx: &Context, package: &Package) -> Result<InstallationResult> {
        let mut log = self.log.lock().unwrap();
        if log.contains(&package.name) {
            return Err(Error::AlreadyInstalled {
                name: package.name.clone(),
            });
        }
        log.push(package.name.clone());
        Ok(InstallationResult::succeeded(
            package.clone(),
            Duration::from_millis(1),
            format!("installed {}", package.source),
        ))
    }

    async fn remove(&self, _ctx: &Context, package: &Package) -> Result<InstallationResult> {
        let mut log = self.log.lock().unwrap();
        let Some(index) = log.iter().position(|name| *name == package.name) else {
            return Err(Error::NotInstalled {
                name: package.name.clone(),
            });
        };
        log.remove(index);
        Ok(InstallationResult::succeeded(package.clone(), Duration::ZERO, "removed"))
    }

    async fn list(&self, _ctx: &Context) -> Result<Vec<Package>> {
        Ok(self
            .log()
            .into_iter()
            .map(|name| Package::new(name.clone(), "apt", name))
            .collect())
    }

    async fn is_installed(&self, _ctx: &Context, name: &str) -> Result<bool> {
        Ok(self.log.lock().unwrap().iter().any(|n| n == name))
    }

    fn best_method(&self, _source: &str) -> Result<InstallMethod> {
        Ok(InstallMethod::Apt)
    }
}

struct UbuntuDetector;

#[async_trait]
impl SystemDetector for UbuntuDetector {
    async fn detect_system(&self, ctx: &Context) -> Result<SystemInfo> {
        Ok(SystemInfo::current_platform()
            .with_distribution(self.detect_distribution(ctx).await?)
            .with_package_manager(self.detect_package_manager(ctx).await?))
    }

    async fn detect_distribution(&self, _ctx: &Context) -> Result<Distribution> {
        Ok(Distribution::new("ubuntu", "Ubuntu", "24.04"))
    }

    async fn detect_desktop_environment(&self, _ctx: &Context) -> Result<DesktopEnvironment> {
        Err(Error::NoDesktopEnvironment)
    }

    async fn detect_package_manager(&self, _ctx: &Context) -> Result<PackageManager> {
        Ok(PackageManager::new("apt", "apt", InstallMethod::Apt))
    }
}

const STACK: &str = r#"
[[package]]
name = "webapp"
group = "apps"
description = "The application"
method = "apt"
source = "webapp"
dependencies = ["nginx", "postgresql", "redis"]

[[package]]
name = "nginx"
group = "web"
method = "apt"
source = "nginx"
version = "1.24"
dependencies = ["openssl"]

[[package]]
name = "postgresql"
method = "apt"
source = "postgresql"
dependencies = ["libc6"]

[[package]]
name = "redis"
method = "apt"
source = "redis-server"

[[package]]
name = "openssl"
method = "apt"
source = "openssl"
dependencies = ["libc6"]

[[package]]
name = "libc6"
method = "apt"
source = "libc6"
"#;

fn write_manifest(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("envboot.toml");
    fs::write(&path, content).unwrap();
    (temp, path)
}

#[tokio::test]
async fn test_manifest_to_ordered_installs() {
    let (_temp, path) = write_manifest(STACK);
    let manifest = Manifest::from_path(&path).unwrap();
    assert!(manifest.invalid_packages().is_empty());

    let graph = DependencyGraph::from_packages(&manifest.packages);
    let plan = graph.resolve("webapp").unwrap();
    assert_eq!(
        plan,
        vec!["libc6", "openssl", "nginx", "postgresql", "redis", "webapp"]
    );

    let installer = Arc::new(RecordingInstaller::default());
    let service = PackageService::new(installer.clone(), Arc::new(UbuntuDetector));
    let ctx = Context::background();

    for name in &plan {
        let package = graph.package(name).unwrap();
        let result = service.install(&ctx, package).await.unwrap();
        assert!(result.success);
        assert_eq!(result.package.name, *name);
    }

    let log = installer.log();
    assert_eq!(log, plan);
    for package in &manifest.packages {
        for dependency in &package.dependencies {
            assert!(position(&log, dependency) < position(&log, &package.name));
        }
    }

    assert!(service.is_installed(&ctx, "redis").await.unwrap());
    assert_eq!(service.list(&ctx).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_reinstall_reports_already_installed() {
    let packages = webapp_stack();
    let service = PackageService::new(
        Arc::new(RecordingInstaller::default()),
        Arc::new(UbuntuDetector),
    );
    let ctx = Context::background();

    service.install(&ctx, &packages[0]).await.unwrap();
    let err = service.install(&ctx, &packages[0]).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyInstalled { .. }));

    service.remove(&ctx, &packages[0]).await.unwrap();
    assert!(!service.is_installed(&ctx, &packages[0].name).await.unwrap());
}

#[tokio::test]
async fn test_manifest_round_trip_keeps_plan() {
    let manifest = Manifest::from_toml(STACK).unwrap();
    let reparsed = Manifest::from_toml(&manifest.to_toml().unwrap()).unwrap();
    assert_eq!(reparsed, manifest);

    let before = DependencyGraph::from_packages(&manifest.packages).resolve_all().unwrap();
    let after = DependencyGraph::from_packages(&reparsed.packages).resolve_all().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_detected_system_ranks_manifest_methods() {
    let service = PackageService::new(
        Arc::new(RecordingInstaller::default()),
        Arc::new(UbuntuDetector),
    );
    let system = service.detect_system(&Context::background()).await.unwrap();

    let methods = [
        InstallMethod::Script,
        InstallMethod::Pacman,
        InstallMethod::Flatpak,
        InstallMethod::AptGet,
        InstallMethod::Apt,
    ];
    assert_eq!(
        rank_methods(&methods, &system),
        vec![
            InstallMethod::Apt,
            InstallMethod::AptGet,
            InstallMethod::Flatpak,
            InstallMethod::Script,
        ]
    );
    assert!(!is_method_compatible(&InstallMethod::Pacman, &system));
}

#[test]
fn test_graph_is_shared_between_threads() {
    let manifest = Manifest::from_toml(STACK).unwrap();
    let graph = DependencyGraph::from_packages(&manifest.packages);
    let graph = &graph;

    let plans: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["webapp", "nginx", "postgresql", "redis"]
            .into_iter()
            .map(|target| scope.spawn(move || graph.resolve(target).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(plans[1], vec!["libc6", "openssl", "nginx"]);
    assert_eq!(plans[2], vec!["libc6", "postgresql"]);
    assert_eq!(plans[3], vec!["redis"]);
    assert_eq!(plans[0].last().map(String::as_str), Some("webapp"));
}
