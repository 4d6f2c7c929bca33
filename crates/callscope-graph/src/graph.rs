//! Call graph structure with bidirectional indexing.

use std::collections::{HashMap, HashSet};

use time::OffsetDateTime;

use crate::edge::{CallEdge, EdgeKey};
use crate::node::{CallNode, NodeId};

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMetadata {
    /// Wall-clock time at which the build finished.
    pub build_time: OffsetDateTime,
    /// Time spent building, in milliseconds.
    pub build_duration_ms: u64,
    /// Number of nodes in the finished graph.
    pub node_count: usize,
    /// Number of edges in the finished graph.
    pub edge_count: usize,
    /// Number of entry files that were handed to an adapter.
    pub files_analyzed: usize,
}

/// A call graph with bidirectional indexing for efficient traversal.
///
/// Every edge stored under its caller in the outgoing index has an identical
/// copy stored under its callee in the incoming index. Nodes and edges are
/// never removed once inserted.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: HashMap<NodeId, CallNode>,
    /// Node IDs in insertion order; defines "first match" for name lookups.
    order: Vec<NodeId>,
    outgoing: HashMap<NodeId, Vec<CallEdge>>,
    incoming: HashMap<NodeId, Vec<CallEdge>>,
    edge_keys: HashSet<EdgeKey>,
    entry_points: Vec<NodeId>,
    metadata: Option<GraphMetadata>,
}

impl CallGraph {
    /// Creates a new empty call graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph.
    ///
    /// Returns `false` without touching the stored node when the ID is
    /// already present: the first writer wins.
    pub fn add_node(&mut self, node: CallNode) -> bool {
        if self.nodes.contains_key(node.id()) {
            return false;
        }
        let id = node.id().clone();
        self.order.push(id.clone());
        self.nodes.insert(id, node);
        true
    }

    /// Adds an edge to both adjacency indices.
    ///
    /// Edges are deduplicated on caller, callee and call site. Returns
    /// `false` when an identical edge already exists.
    pub fn add_edge(&mut self, edge: CallEdge) -> bool {
        if !self.edge_keys.insert(edge.key()) {
            return false;
        }
        self.incoming
            .entry(edge.callee().clone())
            .or_default()
            .push(edge.clone());
        self.outgoing
            .entry(edge.caller().clone())
            .or_default()
            .push(edge);
        true
    }

    /// Marks a node as an entry point, ignoring duplicates.
    pub fn add_entry_point(&mut self, id: NodeId) {
        if !self.entry_points.contains(&id) {
            self.entry_points.push(id);
        }
    }

    /// Returns the node with the given ID.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&CallNode> {
        self.nodes.get(id)
    }

    /// Returns an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over all edges, grouped by caller.
    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.outgoing.values().flatten()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_keys.len()
    }

    /// Returns the edges representing calls *from* the given node.
    #[must_use]
    pub fn outgoing_edges(&self, node_id: &NodeId) -> &[CallEdge] {
        self.outgoing.get(node_id).map_or(&[], Vec::as_slice)
    }

    /// Returns the edges representing calls *to* the given node.
    #[must_use]
    pub fn incoming_edges(&self, node_id: &NodeId) -> &[CallEdge] {
        self.incoming.get(node_id).map_or(&[], Vec::as_slice)
    }

    /// Returns the nodes that call the given node.
    pub fn callers_of(&self, node_id: &NodeId) -> impl Iterator<Item = &CallNode> {
        self.incoming_edges(node_id)
            .iter()
            .filter_map(|edge| self.nodes.get(edge.caller()))
    }

    /// Returns the nodes that are called by the given node.
    pub fn callees_of(&self, node_id: &NodeId) -> impl Iterator<Item = &CallNode> {
        self.outgoing_edges(node_id)
            .iter()
            .filter_map(|edge| self.nodes.get(edge.callee()))
    }

    /// Returns the entry points in the order they were promoted.
    #[must_use]
    pub fn entry_points(&self) -> &[NodeId] {
        &self.entry_points
    }

    /// Returns the build metadata, present once a build has finished.
    #[must_use]
    pub const fn metadata(&self) -> Option<&GraphMetadata> {
        self.metadata.as_ref()
    }

    pub(crate) fn set_metadata(&mut self, metadata: GraphMetadata) {
        self.metadata = Some(metadata);
    }

    /// Returns whether the graph contains a node with the given ID.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns whether the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the first node, in insertion order, whose name or qualified
    /// name equals `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CallNode> {
        self.nodes()
            .find(|node| node.qualified_name() == name || node.name() == name)
    }
}
