//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use envboot_package::MANIFEST_FILENAME;

/// envboot - Plan and preview package installs for a fresh machine
#[derive(Parser, Debug)]
#[command(name = "envboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the package manifest
    #[arg(short, long, global = true, env = "ENVBOOT_MANIFEST", default_value = MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the manifest for invalid packages, duplicates and cycles
    Validate,

    /// Print the install order
    ///
    /// Examples:
    ///   envboot plan           # Order for every package
    ///   envboot plan webapp    # Order for webapp and its dependencies
    Plan {
        /// Package to plan for (all packages if omitted)
        target: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List every transitive dependency of a package
    Deps {
        /// Package name
        name: String,
    },

    /// Describe this machine and the install methods it supports
    System {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Walk the install plan without changing the system
    Preview {
        /// Package to preview (all packages if omitted)
        target: Option<String>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Turn a raw installer error message into guidance
    ///
    /// Examples:
    ///   envboot explain "E: Unable to locate package nginxx" --package nginxx
    Explain {
        /// Raw error text
        message: String,

        /// Package the error relates to
        #[arg(short, long)]
        package: Option<String>,
    },
}
