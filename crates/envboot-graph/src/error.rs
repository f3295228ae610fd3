/// Errors produced while resolving the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The graph contains a cycle. The path starts and ends with the same name.
    #[error("circular dependency detected: {}", path.join(" -> "))]
    CircularDependency { path: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
