//! Error types for envboot-core
//!
//! Each domain failure is its own variant. Wrapping only adds context
//! ([`Error::Package`]) or forwards a lower crate's error transparently, so
//! [`Error::kind`] always recovers the original category.

use envboot_package::{InstallMethod, ValidationError};

/// Result type for envboot-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envboot-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package failed validation and was never handed to a backend
    #[error("invalid package '{name}': {reason}")]
    InvalidPackage {
        name: String,
        reason: ValidationError,
    },

    #[error("package not found: {name}")]
    PackageNotFound { name: String },

    /// The backend cannot perform `operation` with this method
    #[error("unsupported {operation} method '{method}' for {name}")]
    UnsupportedMethod {
        name: String,
        method: InstallMethod,
        operation: &'static str,
    },

    #[error("insufficient disk space to install {name}")]
    InsufficientDiskSpace { name: String },

    #[error("network failure: {message}")]
    NetworkFailure { message: String },

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("package already installed: {name}")]
    AlreadyInstalled { name: String },

    #[error("package is not installed: {name}")]
    NotInstalled { name: String },

    #[error("missing dependency '{dependency}' required by {name}")]
    DependencyMissing { name: String, dependency: String },

    #[error("no supported package manager found")]
    NoPackageManager,

    #[error("no desktop environment detected")]
    NoDesktopEnvironment,

    /// The caller's context was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// The caller's context deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Free-form backend failure with no more specific category
    #[error("{message}")]
    Backend { message: String },

    /// Context wrapper naming the package an error relates to
    #[error("{name}: {source}")]
    Package {
        name: String,
        #[source]
        source: Box<Error>,
    },

    // Transparent wrappers for underlying crate errors
    /// Dependency graph error from envboot-graph
    #[error(transparent)]
    Graph(#[from] envboot_graph::Error),

    /// Manifest error from envboot-package
    #[error(transparent)]
    Manifest(#[from] envboot_package::Error),
}

/// Category of an [`Error`], independent of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPackage,
    PackageNotFound,
    UnsupportedMethod,
    InsufficientDiskSpace,
    NetworkFailure,
    PermissionDenied,
    AlreadyInstalled,
    NotInstalled,
    DependencyMissing,
    CircularDependency,
    NoPackageManager,
    NoDesktopEnvironment,
    Cancelled,
    DeadlineExceeded,
    Backend,
    Manifest,
}

impl Error {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Attach the name of the package this error relates to.
    pub fn for_package(self, name: impl Into<String>) -> Self {
        let name = name.into();
        match self {
            Self::Package { name: existing, source } if existing == name => Self::Package {
                name: existing,
                source,
            },
            other => Self::Package {
                name,
                source: Box::new(other),
            },
        }
    }

    /// The category of this error, looking through context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPackage { .. } => ErrorKind::InvalidPackage,
            Self::PackageNotFound { .. } => ErrorKind::PackageNotFound,
            Self::UnsupportedMethod { .. } => ErrorKind::UnsupportedMethod,
            Self::InsufficientDiskSpace { .. } => ErrorKind::InsufficientDiskSpace,
            Self::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::AlreadyInstalled { .. } => ErrorKind::AlreadyInstalled,
            Self::NotInstalled { .. } => ErrorKind::NotInstalled,
            Self::DependencyMissing { .. } => ErrorKind::DependencyMissing,
            Self::NoPackageManager => ErrorKind::NoPackageManager,
            Self::NoDesktopEnvironment => ErrorKind::NoDesktopEnvironment,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            Self::Backend { .. } => ErrorKind::Backend,
            Self::Package { source, .. } => source.kind(),
            Self::Graph(envboot_graph::Error::CircularDependency { .. }) => {
                ErrorKind::CircularDependency
            }
            Self::Manifest(_) => ErrorKind::Manifest,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Cancelled or deadline exceeded.
    pub fn is_cancellation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Cancelled | ErrorKind::DeadlineExceeded)
    }

    /// Cycle path carried by a circular-dependency error.
    pub fn cycle_path(&self) -> Option<&[String]> {
        match self {
            Self::Graph(envboot_graph::Error::CircularDependency { path }) => Some(path),
            Self::Package { source, .. } => source.cycle_path(),
            _ => None,
        }
    }
}
