//! Graph construction, cycle detection and topological resolution.
//!
//! Edges point from dependent to dependency: if A depends on B, the edge is
//! `A -> B` and resolution places B before A. Edge targets that were never
//! added as packages are treated as optional and skipped during resolution.

use std::collections::{HashMap, HashSet};

use envboot_package::Package;

use crate::error::{Error, Result};

/// Mutable phase of a dependency graph.
///
/// Adding requires `&mut self`, so a builder cannot be shared while it is
/// being filled. Call [`build`](Self::build) to obtain the queryable graph.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder<'a> {
    /// Node names in first-insertion order.
    order: Vec<&'a str>,
    nodes: HashMap<&'a str, &'a Package>,
    /// Adjacency list: key depends on each value, in declaration order.
    edges: HashMap<&'a str, &'a [String]>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package and its dependency list.
    ///
    /// Re-adding a name replaces its package and edges (last write wins) but
    /// keeps the position of the first insertion.
    pub fn add_package(&mut self, package: &'a Package) -> &mut Self {
        let name = package.name.as_str();
        if self.nodes.insert(name, package).is_none() {
            self.order.push(name);
        }
        self.edges.insert(name, package.dependencies.as_slice());
        self
    }

    pub fn add_packages<I>(&mut self, packages: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Package>,
    {
        for package in packages {
            self.add_package(package);
        }
        self
    }

    /// Freeze the builder into a read-only graph.
    pub fn build(self) -> DependencyGraph<'a> {
        DependencyGraph {
            order: self.order,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Read-only dependency graph over borrowed packages.
///
/// Every query takes `&self`, so a built graph can be shared across threads.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    order: Vec<&'a str>,
    nodes: HashMap<&'a str, &'a Package>,
    edges: HashMap<&'a str, &'a [String]>,
}

impl<'a> DependencyGraph<'a> {
    /// Build a graph from packages in one step.
    pub fn from_packages<I>(packages: I) -> Self
    where
        I: IntoIterator<Item = &'a Package>,
    {
        let mut builder = GraphBuilder::new();
        builder.add_packages(packages);
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn package(&self, name: &str) -> Option<&'a Package> {
        self.nodes.get(name).copied()
    }

    /// Node names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.order.iter().copied()
    }

    /// Direct dependencies of a node, in declaration order. Empty for
    /// unknown names.
    pub fn dependencies_of(&self, name: &str) -> &'a [String] {
        self.edges.get(name).copied().unwrap_or(&[])
    }

    /// `(dependent, dependency)` pairs whose dependency was never added.
    pub fn missing_dependencies(&self) -> Vec<(&'a str, &'a str)> {
        self.order
            .iter()
            .flat_map(|&name| {
                self.dependencies_of(name)
                    .iter()
                    .filter(move |dep| !self.contains(dep))
                    .map(move |dep| (name, dep.as_str()))
            })
            .collect()
    }

    pub fn has_circular_dependency(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Find a cycle anywhere in the graph.
    ///
    /// Returns the cycle as a closed path, e.g. `["b", "c", "b"]`. Roots are
    /// scanned in insertion order, so the reported path is deterministic.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();

        for &name in &self.order {
            if visited.contains(name) {
                continue;
            }
            if let Some(cycle) = self.cycle_from(name, &mut visited, &mut on_stack, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    /// Depth-first walk from `root` with an explicit stack of
    /// `(node, next dependency index)` frames. `path` mirrors the frames.
    fn cycle_from(
        &self,
        root: &'a str,
        visited: &mut HashSet<&'a str>,
        on_stack: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(root);
        on_stack.insert(root);
        path.push(root);
        let mut frames: Vec<(&'a str, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (name, next) = *frame;
            let Some(dep) = self.dependencies_of(name).get(next) else {
                on_stack.remove(name);
                path.pop();
                frames.pop();
                continue;
            };
            frame.1 += 1;

            let dep = dep.as_str();
            if on_stack.contains(dep) {
                return Some(close_cycle(path, dep));
            }
            if visited.insert(dep) {
                on_stack.insert(dep);
                path.push(dep);
                frames.push((dep, 0));
            }
        }
        None
    }

    /// Installation order for `start`: every dependency precedes its
    /// dependents and `start` comes last.
    ///
    /// Fails if the graph contains a cycle anywhere, even one unreachable
    /// from `start`. Dependencies that were never added are skipped. An
    /// unknown `start` resolves to itself alone.
    pub fn resolve(&self, start: &str) -> Result<Vec<String>> {
        self.ensure_acyclic()?;

        let Some((&root, _)) = self.nodes.get_key_value(start) else {
            tracing::debug!(start, "Resolving unknown package to itself");
            return Ok(vec![start.to_string()]);
        };

        let mut visited = HashSet::new();
        let mut order = Vec::new();
        self.visit(root, &mut visited, &mut order);

        tracing::debug!(start, ?order, "Resolved dependency order");
        Ok(order.into_iter().map(str::to_string).collect())
    }

    /// Installation order covering every node, rooted in insertion order.
    pub fn resolve_all(&self) -> Result<Vec<String>> {
        self.ensure_acyclic()?;

        let mut visited = HashSet::new();
        let mut order = Vec::with_capacity(self.order.len());
        for &name in &self.order {
            self.visit(name, &mut visited, &mut order);
        }
        Ok(order.into_iter().map(str::to_string).collect())
    }

    fn ensure_acyclic(&self) -> Result<()> {
        match self.find_cycle() {
            Some(path) => {
                tracing::warn!(?path, "Dependency graph contains a cycle");
                Err(Error::CircularDependency { path })
            }
            None => Ok(()),
        }
    }

    /// Post-order walk: dependencies first, then the node itself.
    fn visit(&self, root: &'a str, visited: &mut HashSet<&'a str>, order: &mut Vec<&'a str>) {
        if !visited.insert(root) {
            return;
        }
        let mut frames: Vec<(&'a str, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (name, next) = *frame;
            let Some(dep) = self.dependencies_of(name).get(next) else {
                order.push(name);
                frames.pop();
                continue;
            };
            frame.1 += 1;

            if !self.contains(dep) {
                tracing::debug!(package = name, dependency = %dep, "Skipping unresolvable dependency");
            } else if visited.insert(dep.as_str()) {
                frames.push((dep.as_str(), 0));
            }
        }
    }

    /// Every name transitively reachable from `name`, excluding `name`.
    ///
    /// Includes dependency names that were never added. Terminates on cyclic
    /// graphs because each name is visited once.
    pub fn all_dependencies(&self, name: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(name);

        let mut stack: Vec<&str> = self
            .dependencies_of(name)
            .iter()
            .rev()
            .map(String::as_str)
            .collect();
        let mut found = Vec::new();

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            found.push(current.to_string());
            stack.extend(
                self.dependencies_of(current)
                    .iter()
                    .rev()
                    .map(String::as_str)
                    .filter(|dep| !seen.contains(dep)),
            );
        }
        found
    }
}

impl<'a> FromIterator<&'a Package> for DependencyGraph<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Package>>(iter: I) -> Self {
        Self::from_packages(iter)
    }
}

/// Close a cycle at `repeated`: the suffix of `path` starting at its first
/// occurrence, with `repeated` appended again.
fn close_cycle(path: &[&str], repeated: &str) -> Vec<String> {
    let suffix = match path.iter().position(|&n| n == repeated) {
        Some(start) => &path[start..],
        // Not reachable while `on_stack` mirrors `path`; report the whole path.
        None => path,
    };
    suffix
        .iter()
        .chain(std::iter::once(&repeated))
        .map(|n| n.to_string())
        .collect()
}
