//! Core orchestration layer for envboot.
//!
//! Ties the package model, dependency graph and system model together:
//!
//! - [`error`]: the sentinel error taxonomy and [`ErrorKind`]
//! - [`context`]: cooperative cancellation and deadlines
//! - [`ports`]: the installer and system-detector traits backends implement
//! - [`service`]: [`PackageService`], the validating façade over the ports
//! - [`format`]: classification of raw error text into user guidance

pub mod context;
pub mod error;
pub mod format;
pub mod ports;
pub mod service;

pub use context::{CancellationToken, Context};
pub use error::{Error, ErrorKind, Result};
pub use format::{ErrorCategory, format_error_message};
pub use ports::{Installer, SystemDetector};
pub use service::PackageService;

pub use envboot_graph::{DependencyGraph, GraphBuilder};
pub use envboot_package::{InstallMethod, InstallationResult, Manifest, Package};
pub use envboot_system::SystemInfo;
