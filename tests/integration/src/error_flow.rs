//! Failure paths across the envboot crates
//!
//! Backend failures, graph cycles and cancellation must keep their category
//! all the way to the caller, and render as guidance through the formatter.

use async_trait::async_trait;
use envboot_core::{
    Context, DependencyGraph, Error, ErrorCategory, ErrorKind, Installer, PackageService, Result,
    SystemDetector, format_error_message,
};
use envboot_package::{InstallMethod, InstallationResult, Package};
use envboot_system::{DesktopEnvironment, Distribution, PackageManager, SystemInfo};
use envboot_test_utils::{cycle, package, packages};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Installer that fails named packages with a fixed error.
#[derive(Default)]
struct ScriptedInstaller {
    failures: HashMap<String, fn(&str) -> Error>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedInstaller {
    fn failing(mut self, name: &str, error: fn(&str) -> Error) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Installer for ScriptedInstaller {
    async fn install(&self, _ctx: &Context, package: &Package) -> Result<InstallationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.get(&package.name) {
            Some(make) => Err(make(&package.name)),
            None => Ok(InstallationResult::succeeded(package.clone(), Duration::ZERO, "ok")),
        }
    }

    async fn remove(&self, _ctx: &Context, package: &Package) -> Result<InstallationResult> {
        Err(Error::NotInstalled {
            name: package.name.clone(),
        })
    }

    async fn list(&self, _ctx: &Context) -> Result<Vec<Package>> {
        Ok(Vec::new())
    }

    async fn is_installed(&self, _ctx: &Context, _name: &str) -> Result<bool> {
        Ok(false)
    }

    fn best_method(&self, source: &str) -> Result<InstallMethod> {
        Err(Error::UnsupportedMethod {
            name: source.to_string(),
            method: InstallMethod::Custom("unknown".into()),
            operation: "install",
        })
    }
}

struct HeadlessDetector;

#[async_trait]
impl SystemDetector for HeadlessDetector {
    async fn detect_system(&self, _ctx: &Context) -> Result<SystemInfo> {
        Ok(SystemInfo::default())
    }

    async fn detect_distribution(&self, _ctx: &Context) -> Result<Distribution> {
        Err(Error::backend("no os-release"))
    }

    async fn detect_desktop_environment(&self, _ctx: &Context) -> Result<DesktopEnvironment> {
        Err(Error::NoDesktopEnvironment)
    }

    async fn detect_package_manager(&self, _ctx: &Context) -> Result<PackageManager> {
        Err(Error::NoPackageManager)
    }
}

fn service(installer: ScriptedInstaller) -> (Arc<ScriptedInstaller>, PackageService) {
    let installer = Arc::new(installer);
    let service = PackageService::new(installer.clone(), Arc::new(HeadlessDetector));
    (installer, service)
}

/// Install `plan` in order, stopping at the first failure with the
/// package name attached.
async fn install_all(service: &PackageService, ctx: &Context, plan: &[&Package]) -> Result<()> {
    for package in plan {
        service
            .install(ctx, package)
            .await
            .map_err(|e| e.for_package(&package.name))?;
    }
    Ok(())
}

#[tokio::test]
async fn test_backend_categories_survive_the_service() {
    let (_, service) = service(
        ScriptedInstaller::default()
            .failing("net", |_| Error::NetworkFailure {
                message: "connection reset by peer".into(),
            })
            .failing("root", |_| Error::PermissionDenied {
                message: "are you root?".into(),
            })
            .failing("big", |name| Error::InsufficientDiskSpace { name: name.into() })
            .failing("gone", |name| Error::PackageNotFound { name: name.into() }),
    );
    let ctx = Context::background();

    let cases = [
        ("net", ErrorKind::NetworkFailure, ErrorCategory::Network),
        ("root", ErrorKind::PermissionDenied, ErrorCategory::PermissionDenied),
        ("big", ErrorKind::InsufficientDiskSpace, ErrorCategory::Unknown),
        ("gone", ErrorKind::PackageNotFound, ErrorCategory::NotFound),
    ];
    for (name, kind, category) in cases {
        let err = service
            .install(&ctx, &package(name, &[]))
            .await
            .unwrap_err()
            .for_package(name);
        assert_eq!(err.kind(), kind, "{name}");
        assert_eq!(ErrorCategory::classify(&err.to_string()), category, "{name}");
    }
}

#[tokio::test]
async fn test_plan_stops_at_first_failure_with_context() {
    let stack = packages(&[("app", &["lib"]), ("lib", &["base"]), ("base", &[])]);
    let graph = DependencyGraph::from_packages(&stack);
    let plan: Vec<&Package> = graph
        .resolve("app")
        .unwrap()
        .iter()
        .filter_map(|name| graph.package(name))
        .collect();

    let (installer, service) = service(
        ScriptedInstaller::default().failing("lib", |_| Error::NetworkFailure {
            message: "timeout".into(),
        }),
    );

    let err = install_all(&service, &Context::background(), &plan)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert_eq!(err.to_string(), "lib: network failure: timeout");
    assert_eq!(installer.calls.load(Ordering::SeqCst), 2);

    let shown = format_error_message(Some(&err), Some("lib"), false);
    assert_eq!(
        shown,
        "✗ Failed to install lib: Network connection failed (Check your internet connection)"
    );
}

#[tokio::test]
async fn test_cycle_reaches_caller_as_circular_dependency() {
    let stack = cycle();
    let graph = DependencyGraph::from_packages(&stack);

    let err: Error = graph.resolve_all().unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::CircularDependency);
    let path = err.cycle_path().unwrap();
    assert_eq!(path.first(), path.last());
    assert_eq!(path.len(), 4);

    // "dependency" in the message puts cycles in the dependency category
    let shown = format_error_message(Some(&err), None, true);
    assert!(shown.starts_with("✗ Missing dependencies"));
    assert!(shown.contains("circular dependency detected: a -> b -> c -> a"));
}

#[tokio::test]
async fn test_invalid_packages_are_rejected_before_the_backend() {
    let (installer, service) = service(ScriptedInstaller::default());
    let ctx = Context::background();

    for bad in [
        Package::new(" ", "apt", "x"),
        Package::new("x", "", "x"),
        Package::new("x", "apt", ""),
    ] {
        let err = service.install(&ctx, &bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPackage);
    }
    assert_eq!(installer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cuts_a_slow_plan_short() {
    let stack = packages(&[("a", &[]), ("b", &[]), ("c", &[])]);
    let plan: Vec<&Package> = stack.iter().collect();
    let (installer, service) = service(ScriptedInstaller::default().slow(Duration::from_secs(10)));

    let ctx = Context::background().with_timeout(Duration::from_secs(25));
    let err = install_all(&service, &ctx, &plan).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
    assert!(err.is_cancellation());
    assert_eq!(err.to_string(), "c: deadline exceeded");
    assert_eq!(installer.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_detector_failures_are_categorized() {
    let detector = HeadlessDetector;
    let ctx = Context::background();
    assert_eq!(
        detector.detect_desktop_environment(&ctx).await.unwrap_err().kind(),
        ErrorKind::NoDesktopEnvironment
    );
    assert_eq!(
        detector.detect_package_manager(&ctx).await.unwrap_err().kind(),
        ErrorKind::NoPackageManager
    );

    let (_, service) = service(ScriptedInstaller::default());
    assert_eq!(
        service.best_method("mystery").unwrap_err().kind(),
        ErrorKind::UnsupportedMethod
    );
    assert_eq!(service.detect_system(&ctx).await.unwrap(), SystemInfo::default());
}
