//! Integration tests for the envboot CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MANIFEST: &str = r#"
[[package]]
name = "webapp"
method = "apt"
source = "webapp"
dependencies = ["nginx", "redis"]

[[package]]
name = "nginx"
method = "apt"
source = "nginx"
dependencies = ["openssl"]

[[package]]
name = "openssl"
method = "apt"
source = "openssl"

[[package]]
name = "redis"
method = "apt"
source = "redis-server"
"#;

const CYCLIC: &str = r#"
[[package]]
name = "a"
method = "apt"
source = "a"
dependencies = ["b"]

[[package]]
name = "b"
method = "apt"
source = "b"
dependencies = ["a"]
"#;

/// Get a Command for the envboot binary
fn envboot_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("envboot"));
    cmd.current_dir(dir)
        .env_remove("ENVBOOT_MANIFEST")
        .env_remove("ENVBOOT_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_os_release(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("os-release");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    let dir = tempdir().unwrap();
    envboot_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn test_version_output() {
    let dir = tempdir().unwrap();
    envboot_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envboot"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let dir = tempdir().unwrap();
    envboot_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("envboot --help"));
}

// ============================================================================
// Manifest Commands
// ============================================================================

#[test]
fn test_validate_reads_default_manifest() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();

    envboot_cmd(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest is valid"));
}

#[test]
fn test_validate_reports_cycle() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cyclic.toml"), CYCLIC).unwrap();

    envboot_cmd(dir.path())
        .args(["validate", "--manifest", "cyclic.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("a -> b -> a"))
        .stderr(predicate::str::contains("1 problem(s) found"));
}

#[test]
fn test_missing_manifest_fails() {
    let dir = tempdir().unwrap();
    envboot_cmd(dir.path())
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_plan_json() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();

    let output = envboot_cmd(dir.path())
        .args(["plan", "webapp", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let order: Vec<&str> = value["order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["openssl", "nginx", "redis", "webapp"]);
    assert_eq!(value["target"], "webapp");
}

#[test]
fn test_plan_unknown_target() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();

    envboot_cmd(dir.path())
        .args(["plan", "nginxx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package not found: nginxx"));
}

#[test]
fn test_deps_lists_transitive_dependencies() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();

    envboot_cmd(dir.path())
        .args(["deps", "webapp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("openssl"))
        .stdout(predicate::str::contains("redis"));
}

// ============================================================================
// Host Commands
// ============================================================================

#[test]
fn test_system_json_uses_os_release_override() {
    let dir = tempdir().unwrap();
    let release = write_os_release(
        dir.path(),
        "NAME=\"Fedora Linux\"\nID=fedora\nVARIANT_ID=silverblue\nVERSION_ID=40\n",
    );

    let output = envboot_cmd(dir.path())
        .args(["system", "--json"])
        .env("ENVBOOT_OS_RELEASE", &release)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["system"]["distribution"]["id"], "silverblue");
    assert_eq!(value["immutable"], true);
    assert_eq!(value["methods"][0], "flatpak");
}

#[test]
fn test_preview_on_matching_host() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();
    let release = write_os_release(dir.path(), "NAME=Ubuntu\nID=ubuntu\nVERSION_ID=24.04\n");

    envboot_cmd(dir.path())
        .arg("preview")
        .env("ENVBOOT_OS_RELEASE", &release)
        .assert()
        .success()
        .stdout(predicate::str::contains("sudo apt install -y redis-server"))
        .stdout(predicate::str::contains("4 package(s) ready to install"));
}

#[test]
fn test_preview_on_foreign_host() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("envboot.toml"), MANIFEST).unwrap();
    let release = write_os_release(dir.path(), "NAME=Arch Linux\nID=arch\n");

    envboot_cmd(dir.path())
        .args(["preview", "nginx"])
        .env("ENVBOOT_OS_RELEASE", &release)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to install openssl"))
        .stdout(predicate::str::contains("Failed to install nginx: Missing dependencies"))
        .stderr(predicate::str::contains("2 of 2 package(s) would fail"));
}

#[test]
fn test_explain() {
    let dir = tempdir().unwrap();
    envboot_cmd(dir.path())
        .args(["explain", "E: Unable to locate package nginxx", "--package", "nginxx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Package not found: 'nginxx'"))
        .stdout(predicate::str::contains("Check the package name for typos"));
}
