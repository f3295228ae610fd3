//! Install-method compatibility and priority.
//!
//! Universal methods work everywhere. Every other method is tied to the
//! distribution families listed in [`compatible_families`]; without a
//! detected distribution none of them is compatible.

use envboot_package::InstallMethod;

use crate::info::SystemInfo;

/// Priority assigned to methods missing from the ranking table.
pub const UNKNOWN_PRIORITY: u32 = 999;

/// Priority of flatpak on immutable-base systems, ahead of everything else.
const IMMUTABLE_FLATPAK_PRIORITY: u32 = 0;

/// Distribution families (or ids) a distribution-bound method requires.
fn compatible_families(method: &InstallMethod) -> &'static [&'static str] {
    match method {
        InstallMethod::Apt | InstallMethod::AptGet | InstallMethod::Deb => &["debian"],
        InstallMethod::Dnf | InstallMethod::Yum => &["fedora"],
        InstallMethod::Rpm => &["fedora", "suse"],
        InstallMethod::Pacman => &["arch"],
        InstallMethod::Zypper => &["suse"],
        _ => &[],
    }
}

/// Whether `method` can be used on the described machine.
pub fn is_method_compatible(method: &InstallMethod, system: &SystemInfo) -> bool {
    if method.is_universal() {
        return true;
    }
    let Some(distribution) = &system.distribution else {
        return false;
    };
    compatible_families(method)
        .iter()
        .any(|family| distribution.matches(family))
}

/// Preference rank of `method` on the described machine. Lower is better.
pub fn method_priority(method: &InstallMethod, system: &SystemInfo) -> u32 {
    if *method == InstallMethod::Flatpak && system.is_immutable() {
        return IMMUTABLE_FLATPAK_PRIORITY;
    }
    match method {
        InstallMethod::Apt | InstallMethod::Dnf | InstallMethod::Pacman | InstallMethod::Zypper => 1,
        InstallMethod::AptGet | InstallMethod::Yum => 2,
        InstallMethod::Flatpak => 3,
        InstallMethod::Snap => 4,
        InstallMethod::AppImage => 5,
        InstallMethod::Deb | InstallMethod::Rpm => 6,
        InstallMethod::GitHubRelease => 7,
        InstallMethod::Binary => 8,
        InstallMethod::Script => 9,
        InstallMethod::Custom(_) => UNKNOWN_PRIORITY,
    }
}

/// Compatible methods from `methods`, most preferred first. Ties keep their
/// input order.
pub fn rank_methods<'m, I>(methods: I, system: &SystemInfo) -> Vec<InstallMethod>
where
    I: IntoIterator<Item = &'m InstallMethod>,
{
    let mut ranked: Vec<InstallMethod> = methods
        .into_iter()
        .filter(|m| is_method_compatible(m, system))
        .cloned()
        .collect();
    ranked.sort_by_key(|m| method_priority(m, system));
    ranked
}
