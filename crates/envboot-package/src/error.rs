use std::path::PathBuf;

/// Errors that can occur while loading or writing package manifests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse manifest TOML.
    #[error("failed to parse package manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Manifest file not found at the expected path.
    #[error("package manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Failed to serialize a manifest.
    #[error("failed to serialize package manifest: {0}")]
    ManifestSerialize(String),

    /// I/O error reading or writing manifest files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
