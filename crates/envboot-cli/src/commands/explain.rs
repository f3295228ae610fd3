//! Explain command implementation

use envboot_core::format_error_message;

/// Render guidance for a raw error message.
pub fn explain(message: &str, package: Option<&str>, verbose: bool) -> String {
    format_error_message(Some(&message), package, verbose)
}

/// Run the explain command
pub fn run_explain(message: &str, package: Option<&str>, verbose: bool) {
    println!("{}", explain(message, package, verbose));
}
