//! Forward dependency closure of a symbol.

use std::collections::HashSet;

use camino::Utf8PathBuf;

use crate::graph::CallGraph;
use crate::node::{CallNode, NodeId};

/// Nodes and files reachable from a start symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Reachable nodes in depth-first pre-order, starting with the start node.
    pub nodes: Vec<CallNode>,
    /// Distinct files of `nodes`, in first-seen order.
    pub files: Vec<Utf8PathBuf>,
}

/// Collects the callee closure of `start`.
///
/// When `include_transitive` is `false` only the start node itself is
/// returned, not its direct callees. IDs missing from the node table are
/// skipped, so an unknown start yields an empty result.
#[must_use]
pub fn extract_dependencies(
    graph: &CallGraph,
    start: &NodeId,
    include_transitive: bool,
) -> Dependencies {
    let mut visited = HashSet::new();
    let mut dependencies = Dependencies::default();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = graph.node(id) else {
            continue;
        };
        if !dependencies.files.iter().any(|file| file == node.file_path()) {
            dependencies.files.push(node.file_path().to_path_buf());
        }
        dependencies.nodes.push(node.clone());

        if include_transitive {
            // Reversed so callees are visited in edge order.
            stack.extend(
                graph
                    .outgoing_edges(id)
                    .iter()
                    .rev()
                    .map(|edge| edge.callee()),
            );
        }
    }
    dependencies
}
