//! Filtered subgraph extraction over a built graph.
//!
//! A query resolves a root symbol and walks the graph from it, copying every
//! accepted node and traversed edge into a new, disjoint [`CallGraph`].

use std::collections::HashSet;
use std::time::Instant;

use callscope_config::Config;

use crate::direction::Direction;
use crate::error::GraphError;
use crate::graph::CallGraph;
use crate::node::{CallNode, NodeId};

/// Default walk depth for queries.
pub const DEFAULT_QUERY_DEPTH: u32 = 5;

/// Parameters of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    entry: String,
    max_depth: u32,
    direction: Direction,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl QueryOptions {
    /// Creates options rooted at `entry` (a node ID, qualified name or name).
    #[must_use]
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            max_depth: DEFAULT_QUERY_DEPTH,
            direction: Direction::default(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Creates options rooted at `entry` with the configured depth.
    #[must_use]
    pub fn from_config(config: &Config, entry: impl Into<String>) -> Self {
        Self::new(entry).with_max_depth(config.query_max_depth())
    }

    /// Sets the walk depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the walk direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Keeps only nodes whose file path contains one of `patterns`.
    #[must_use]
    pub fn with_include_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Drops nodes whose file path contains any of `patterns`.
    #[must_use]
    pub fn with_exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the root entry.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Returns the walk depth.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Returns the walk direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    fn accepts(&self, node: &CallNode) -> bool {
        let path = node.file_path().as_str();
        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|pattern| path.contains(pattern.as_str()));
        let excluded = self
            .exclude_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()));
        included && !excluded
    }
}

/// A root-to-node path discovered by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPath {
    /// Node IDs from the root to the reached node, inclusive.
    pub node_ids: Vec<NodeId>,
    /// Number of hops from the root.
    pub depth: u32,
}

/// Result of a query.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The resolved root node.
    pub root: CallNode,
    /// Newly allocated subgraph whose only entry point is the root.
    pub subgraph: CallGraph,
    /// One path per accepted node, in visit order.
    pub paths: Vec<QueryPath>,
    /// Time spent walking, in milliseconds.
    pub query_time_ms: u64,
}

/// Extracts the subgraph around `options.entry`.
///
/// The root is the node whose ID equals the entry or, failing that, the
/// first node in insertion order whose qualified name or name equals it.
/// With [`Direction::Both`] both edge directions are followed at every
/// visited node. Nodes rejected by the path filters are omitted and not
/// explored, but an edge already copied from an accepted neighbour is kept,
/// so the subgraph may reference nodes it does not contain.
///
/// # Errors
/// Returns [`GraphError::RootNotFound`] if the entry matches no node.
pub fn query(graph: &CallGraph, options: &QueryOptions) -> Result<QueryResult, GraphError> {
    let started = Instant::now();
    let root = resolve_root(graph, &options.entry)
        .ok_or_else(|| GraphError::root_not_found(&options.entry))?;

    let mut walk = Walk {
        graph,
        options,
        visited: HashSet::new(),
        subgraph: CallGraph::new(),
        paths: Vec::new(),
    };
    walk.visit(root.id(), 0, vec![root.id().clone()]);

    let Walk {
        mut subgraph,
        paths,
        ..
    } = walk;
    subgraph.add_entry_point(root.id().clone());

    Ok(QueryResult {
        root: root.clone(),
        subgraph,
        paths,
        query_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

fn resolve_root<'g>(graph: &'g CallGraph, entry: &str) -> Option<&'g CallNode> {
    graph
        .node(&NodeId::from(entry))
        .or_else(|| graph.find_by_name(entry))
}

struct Walk<'g, 'o> {
    graph: &'g CallGraph,
    options: &'o QueryOptions,
    visited: HashSet<NodeId>,
    subgraph: CallGraph,
    paths: Vec<QueryPath>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, id: &NodeId, depth: u32, path: Vec<NodeId>) {
        if depth > self.options.max_depth || !self.visited.insert(id.clone()) {
            return;
        }
        let graph = self.graph;
        let Some(node) = graph.node(id) else {
            return;
        };
        if !self.options.accepts(node) {
            return;
        }

        self.subgraph.add_node(node.clone());
        self.paths.push(QueryPath {
            node_ids: path.clone(),
            depth,
        });
        if depth >= self.options.max_depth {
            return;
        }

        let direction = self.options.direction;
        if direction.includes_callees() {
            for edge in graph.outgoing_edges(id) {
                self.subgraph.add_edge(edge.clone());
                self.visit(edge.callee(), depth + 1, extend(&path, edge.callee()));
            }
        }
        if direction.includes_callers() {
            for edge in graph.incoming_edges(id) {
                self.subgraph.add_edge(edge.clone());
                self.visit(edge.caller(), depth + 1, extend(&path, edge.caller()));
            }
        }
    }
}

fn extend(path: &[NodeId], next: &NodeId) -> Vec<NodeId> {
    let mut extended = Vec::with_capacity(path.len() + 1);
    extended.extend_from_slice(path);
    extended.push(next.clone());
    extended
}
