//! Target machine model for envboot.
//!
//! Describes a machine (distribution, desktop environment, package manager)
//! as read-only snapshots produced by a detector, and answers which install
//! methods fit that machine and in what order of preference.

pub mod compat;
pub mod info;
pub mod os_release;

pub use compat::{UNKNOWN_PRIORITY, is_method_compatible, method_priority, rank_methods};
pub use info::{DesktopEnvironment, Distribution, PackageManager, SessionType, SystemInfo};
