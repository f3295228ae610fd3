//! Turn raw error text into guidance a person can act on.
//!
//! Classification is a case-insensitive substring match against the error
//! message. Categories are tried in a fixed order and the first match wins,
//! so a message mentioning both "permission" and "not found" is reported as
//! a permission problem.

use std::fmt;

/// Marker printed in front of every formatted failure.
pub const FAILURE_GLYPH: &str = "✗";

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    PermissionDenied,
    Network,
    NotFound,
    AlreadyInstalled,
    NotInstalled,
    MissingDependencies,
    /// No pattern matched.
    Unknown,
}

impl ErrorCategory {
    /// Categories in match order.
    const ORDERED: [ErrorCategory; 6] = [
        ErrorCategory::PermissionDenied,
        ErrorCategory::Network,
        ErrorCategory::NotFound,
        ErrorCategory::AlreadyInstalled,
        ErrorCategory::NotInstalled,
        ErrorCategory::MissingDependencies,
    ];

    /// Lowercase substrings that select this category.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::PermissionDenied => &["permission", "denied", "sudo", "root"],
            Self::Network => &["network", "connection", "timeout", "no such host"],
            Self::NotFound => &["not found", "no such", "unable to locate"],
            Self::AlreadyInstalled => &["already installed", "is installed"],
            Self::NotInstalled => &["not installed", "is not installed"],
            Self::MissingDependencies => &["dependency", "depends", "requires"],
            Self::Unknown => &[],
        }
    }

    /// Classify raw error text.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        Self::ORDERED
            .into_iter()
            .find(|category| category.patterns().iter().any(|p| lower.contains(p)))
            .unwrap_or(Self::Unknown)
    }

    /// Headline for this category, naming the package where it helps.
    pub fn message(self, package: Option<&str>) -> String {
        match self {
            Self::PermissionDenied => "Permission denied".to_string(),
            Self::Network => "Network connection failed".to_string(),
            Self::NotFound => match package {
                Some(name) => format!("Package not found: '{name}'"),
                None => "Package not found".to_string(),
            },
            Self::AlreadyInstalled => "Already installed".to_string(),
            Self::NotInstalled => "Not installed".to_string(),
            Self::MissingDependencies => "Missing dependencies".to_string(),
            Self::Unknown => "Operation failed".to_string(),
        }
    }

    /// Actionable suggestions, most useful first.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::PermissionDenied => &[
                "Try running the command with sudo",
                "Make sure your user has administrator privileges",
            ],
            Self::Network => &[
                "Check your internet connection",
                "Retry the operation in a few moments",
                "Check proxy or firewall settings",
            ],
            Self::NotFound => &[
                "Check the package name for typos",
                "Refresh the package lists (e.g. sudo apt update)",
                "Search for the package with your package manager",
            ],
            Self::AlreadyInstalled => &["The package is already present, nothing to do"],
            Self::NotInstalled => &["List installed packages to check the exact name"],
            Self::MissingDependencies => &[
                "Install the required dependencies first",
                "Check the package documentation for prerequisites",
            ],
            Self::Unknown => &["Run again with --verbose for technical details"],
        }
    }
}

/// Render an error for display.
///
/// Returns an empty string when there is no error. In verbose mode the raw
/// error text and every suggestion are listed; otherwise only the first
/// suggestion is shown and the raw text is left out.
pub fn format_error_message(
    error: Option<&dyn fmt::Display>,
    package: Option<&str>,
    verbose: bool,
) -> String {
    let Some(error) = error else {
        return String::new();
    };
    let raw = error.to_string();
    let package = package.filter(|name| !name.trim().is_empty());
    let category = ErrorCategory::classify(&raw);
    let headline = category.message(package);

    let mut out = match package {
        Some(name) => format!("{FAILURE_GLYPH} Failed to install {name}: {headline}"),
        None => format!("{FAILURE_GLYPH} {headline}"),
    };

    let suggestions = category.suggestions();
    if verbose {
        out.push_str("\n\nTechnical details:\n  ");
        out.push_str(&raw);
        out.push_str("\n\nSuggestions:");
        for suggestion in suggestions {
            out.push_str("\n  • ");
            out.push_str(suggestion);
        }
    } else if let Some(first) = suggestions.first() {
        out.push_str(&format!(" ({first})"));
    }
    out
}
