//! Install methods.
//!
//! The method names the mechanism that performs an install. Known methods
//! map to a fixed lowercase string form; anything else is carried as
//! [`InstallMethod::Custom`] so that manifests with unfamiliar methods still
//! load and the validation rule, not the parser, decides whether a package
//! is usable.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mechanism used to install a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstallMethod {
    /// Debian/Ubuntu `apt`.
    Apt,
    /// Legacy Debian front-end `apt-get`.
    AptGet,
    /// Fedora/RHEL `dnf`.
    Dnf,
    /// Legacy Fedora/RHEL front-end `yum`.
    Yum,
    /// Arch Linux `pacman`.
    Pacman,
    /// openSUSE `zypper`.
    Zypper,
    /// Flatpak containerized store.
    Flatpak,
    /// Snap containerized store.
    Snap,
    /// Self-contained AppImage bundle.
    AppImage,
    /// Direct `.deb` package file.
    Deb,
    /// Direct `.rpm` package file.
    Rpm,
    /// Installer script fetched from a URL.
    Script,
    /// Raw binary download.
    Binary,
    /// Release asset from a source-control host (`owner/repo`).
    GitHubRelease,
    /// Any method not known to envboot. The string is kept verbatim.
    Custom(String),
}

impl InstallMethod {
    /// All known (non-custom) methods.
    pub const KNOWN: [InstallMethod; 14] = [
        InstallMethod::Apt,
        InstallMethod::AptGet,
        InstallMethod::Dnf,
        InstallMethod::Yum,
        InstallMethod::Pacman,
        InstallMethod::Zypper,
        InstallMethod::Flatpak,
        InstallMethod::Snap,
        InstallMethod::AppImage,
        InstallMethod::Deb,
        InstallMethod::Rpm,
        InstallMethod::Script,
        InstallMethod::Binary,
        InstallMethod::GitHubRelease,
    ];

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Apt => "apt",
            Self::AptGet => "apt-get",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Flatpak => "flatpak",
            Self::Snap => "snap",
            Self::AppImage => "appimage",
            Self::Deb => "deb",
            Self::Rpm => "rpm",
            Self::Script => "script",
            Self::Binary => "binary",
            Self::GitHubRelease => "github-release",
            Self::Custom(s) => s,
        }
    }

    /// Methods that work on any distribution.
    pub fn is_universal(&self) -> bool {
        matches!(
            self,
            Self::Flatpak
                | Self::Snap
                | Self::AppImage
                | Self::Script
                | Self::Binary
                | Self::GitHubRelease
        )
    }

    /// Methods backed by a distribution's own package manager.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            Self::Apt | Self::AptGet | Self::Dnf | Self::Yum | Self::Pacman | Self::Zypper
        )
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// A missing method. Validation reports it as [`EmptyMethod`].
///
/// [`EmptyMethod`]: crate::ValidationError::EmptyMethod
impl Default for InstallMethod {
    fn default() -> Self {
        Self::Custom(String::new())
    }
}

impl FromStr for InstallMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.trim().to_ascii_lowercase().as_str() {
            "apt" => Self::Apt,
            "apt-get" => Self::AptGet,
            "dnf" => Self::Dnf,
            "yum" => Self::Yum,
            "pacman" => Self::Pacman,
            "zypper" => Self::Zypper,
            "flatpak" => Self::Flatpak,
            "snap" => Self::Snap,
            "appimage" => Self::AppImage,
            "deb" => Self::Deb,
            "rpm" => Self::Rpm,
            "script" => Self::Script,
            "binary" => Self::Binary,
            "github-release" | "github" => Self::GitHubRelease,
            _ => Self::Custom(s.to_string()),
        };
        Ok(method)
    }
}

impl From<String> for InstallMethod {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for InstallMethod {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<InstallMethod> for String {
    fn from(method: InstallMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
