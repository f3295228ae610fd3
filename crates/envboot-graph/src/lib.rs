//! Dependency graph for envboot packages.
//!
//! Graphs are built in two phases: a [`GraphBuilder`] collects packages,
//! then [`GraphBuilder::build`] freezes it into a [`DependencyGraph`] that
//! only answers queries. Both borrow the packages they are given.
//!
//! # Example
//!
//! ```
//! use envboot_graph::GraphBuilder;
//! use envboot_package::Package;
//!
//! let base = Package::new("libc6", "apt", "libc6");
//! let ssl = Package::new("openssl", "apt", "openssl").with_dependencies(["libc6"]);
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_package(&ssl).add_package(&base);
//! let graph = builder.build();
//!
//! assert_eq!(graph.resolve("openssl").unwrap(), vec!["libc6", "openssl"]);
//! ```

pub mod error;
pub mod graph;

pub use error::{Error, Result};
pub use graph::{DependencyGraph, GraphBuilder};
