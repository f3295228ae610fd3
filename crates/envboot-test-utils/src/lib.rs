//! Shared test fixtures for the envboot workspace.
//!
//! Dev-dependency only. Every fixture returns owned packages so tests can
//! borrow them into a graph builder.

use envboot_package::Package;

/// A valid apt package named `name` with the given dependencies.
pub fn package(name: &str, dependencies: &[&str]) -> Package {
    Package::new(name, "apt", name).with_dependencies(dependencies.iter().copied())
}

/// Build one package per `(name, dependencies)` pair, in order.
pub fn packages(entries: &[(&str, &[&str])]) -> Vec<Package> {
    entries.iter().map(|(name, deps)| package(name, deps)).collect()
}

/// The web application stack:
///
/// ```text
/// webapp -> nginx, postgresql, redis
/// nginx -> openssl
/// postgresql -> openssl
/// redis -> libc6
/// openssl -> libc6
/// libc6
/// ```
pub fn webapp_stack() -> Vec<Package> {
    packages(&[
        ("webapp", &["nginx", "postgresql", "redis"]),
        ("nginx", &["openssl"]),
        ("postgresql", &["openssl"]),
        ("redis", &["libc6"]),
        ("openssl", &["libc6"]),
        ("libc6", &[]),
    ])
}

/// `app -> lib1, lib2`, both libs depending on `base`.
pub fn diamond() -> Vec<Package> {
    packages(&[
        ("app", &["lib1", "lib2"]),
        ("lib1", &["base"]),
        ("lib2", &["base"]),
        ("base", &[]),
    ])
}

/// `a -> b -> c -> a`.
pub fn cycle() -> Vec<Package> {
    packages(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])])
}

/// Position of `name` in `order`.
///
/// # Panics
/// Panics if `name` is not present.
pub fn position(order: &[String], name: &str) -> usize {
    order
        .iter()
        .position(|n| n == name)
        .unwrap_or_else(|| panic!("position: {name} not found in {order:?}"))
}
