//! Machine snapshot types.

use serde::Serialize;

use envboot_package::InstallMethod;

/// Distribution ids (or variant ids) of immutable-base systems.
const IMMUTABLE_IDS: &[&str] = &["silverblue", "kinoite", "bluefin", "aurora", "bazzite"];

/// Linux distribution identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Lowercase id, e.g. `ubuntu`, `fedora`, `silverblue`.
    pub id: String,
    /// Family the distribution derives from, e.g. `debian` for Ubuntu.
    pub family: String,
    /// Human-readable name.
    pub name: String,
    pub version: String,
}

impl Distribution {
    /// Build a distribution, deriving its family from `id`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        let id = id.into().to_ascii_lowercase();
        let family = family_of(&id).unwrap_or(id.as_str()).to_string();
        Self {
            id,
            family,
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Whether the id or family equals `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.family == key
    }

    /// Immutable-base systems prefer containerized installs.
    pub fn is_immutable(&self) -> bool {
        IMMUTABLE_IDS.contains(&self.id.as_str())
    }
}

/// Map a distribution id (or an `ID_LIKE` entry) to its family.
pub(crate) fn family_of(id: &str) -> Option<&'static str> {
    match id {
        "debian" | "ubuntu" | "linuxmint" | "pop" | "elementary" | "kali" | "raspbian" => {
            Some("debian")
        }
        "fedora" | "rhel" | "centos" | "rocky" | "almalinux" | "silverblue" | "kinoite"
        | "bluefin" | "aurora" | "bazzite" => Some("fedora"),
        "arch" | "manjaro" | "endeavouros" | "garuda" | "artix" | "cachyos" => Some("arch"),
        "suse" | "sles" => Some("suse"),
        other if other.starts_with("opensuse") => Some("suse"),
        _ => None,
    }
}

/// Display server protocol of the running session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Wayland,
    X11,
    Tty,
    #[default]
    Unknown,
}

impl SessionType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "wayland" => Self::Wayland,
            "x11" => Self::X11,
            "tty" => Self::Tty,
            _ => Self::Unknown,
        }
    }
}

/// Desktop environment of the running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopEnvironment {
    /// Lowercase name, e.g. `gnome`, `kde`.
    pub name: String,
    pub session: SessionType,
}

impl DesktopEnvironment {
    pub fn new(name: impl Into<String>, session: SessionType) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            session,
        }
    }

    /// Build from `XDG_CURRENT_DESKTOP` and `XDG_SESSION_TYPE` values.
    ///
    /// `XDG_CURRENT_DESKTOP` may list several colon-separated names
    /// (`ubuntu:GNOME`); the last one is the actual desktop.
    pub fn from_session(current_desktop: &str, session_type: &str) -> Option<Self> {
        let name = current_desktop
            .split(':')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .last()?;
        Some(Self::new(name, SessionType::parse(session_type)))
    }
}

/// A package manager present on the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManager {
    pub name: String,
    /// Executable looked up on `PATH`.
    pub command: String,
    /// Install method this manager implements.
    #[serde(serialize_with = "serialize_method")]
    pub method: InstallMethod,
}

fn serialize_method<S: serde::Serializer>(method: &InstallMethod, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

impl PackageManager {
    pub fn new(name: impl Into<String>, command: impl Into<String>, method: InstallMethod) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            method,
        }
    }

    /// Package managers envboot knows how to look for, native ones first.
    pub fn known() -> Vec<PackageManager> {
        [
            ("apt", InstallMethod::Apt),
            ("dnf", InstallMethod::Dnf),
            ("pacman", InstallMethod::Pacman),
            ("zypper", InstallMethod::Zypper),
            ("apt-get", InstallMethod::AptGet),
            ("yum", InstallMethod::Yum),
            ("flatpak", InstallMethod::Flatpak),
            ("snap", InstallMethod::Snap),
        ]
        .into_iter()
        .map(|(cmd, method)| PackageManager::new(cmd, cmd, method))
        .collect()
    }
}

/// Snapshot of the target machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    /// Operating system name, e.g. `linux`.
    pub os: String,
    /// CPU architecture, e.g. `x86_64`.
    pub arch: String,
    pub distribution: Option<Distribution>,
    pub desktop: Option<DesktopEnvironment>,
    /// Preferred package manager.
    pub package_manager: Option<PackageManager>,
}

impl SystemInfo {
    /// Snapshot of the compile-time OS and architecture with nothing detected.
    pub fn current_platform() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            ..Self::default()
        }
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = Some(distribution);
        self
    }

    pub fn with_desktop(mut self, desktop: DesktopEnvironment) -> Self {
        self.desktop = Some(desktop);
        self
    }

    pub fn with_package_manager(mut self, manager: PackageManager) -> Self {
        self.package_manager = Some(manager);
        self
    }

    pub fn is_immutable(&self) -> bool {
        self.distribution.as_ref().is_some_and(Distribution::is_immutable)
    }
}
