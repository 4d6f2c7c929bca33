//! Depth-bounded recursive traversal shared by every entry of one build.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::pin::Pin;

use camino::Utf8Path;
use tracing::debug;

use super::BUILDER_TARGET;
use super::progress::{BuildProgress, ProgressPhase};
use crate::adapter::{CallGraphAdapter, CallHierarchyItem, Range};
use crate::direction::Direction;
use crate::edge::CallEdge;
use crate::error::GraphError;
use crate::graph::CallGraph;
use crate::node::{NodeId, Position};

type Adapter = dyn CallGraphAdapter + 'static;
type TraversalFuture<'a> = Pin<Box<dyn Future<Output = Result<(), GraphError>> + Send + 'a>>;

/// Mutable state of one build.
///
/// The visited set is global to the build: once a node has started
/// expanding in any direction it is never expanded again, even if a later
/// entry would reach it from the other side.
pub(super) struct Traversal {
    graph: CallGraph,
    visited: HashSet<NodeId>,
    max_depth: u32,
    files_processed: usize,
}

impl Traversal {
    pub(super) fn new(max_depth: u32) -> Self {
        Self {
            graph: CallGraph::new(),
            visited: HashSet::new(),
            max_depth,
            files_processed: 0,
        }
    }

    pub(super) const fn record_file(&mut self) {
        self.files_processed += 1;
    }

    pub(super) fn progress(
        &self,
        phase: ProgressPhase,
        current_file: Option<&str>,
        total_files: usize,
    ) -> BuildProgress {
        BuildProgress {
            phase,
            current_file: current_file.map(str::to_owned),
            files_processed: self.files_processed,
            total_files,
            nodes_discovered: self.graph.node_count(),
            edges_discovered: self.graph.edge_count(),
        }
    }

    pub(super) fn finish(self) -> (CallGraph, usize) {
        (self.graph, self.files_processed)
    }

    /// Adds every symbol of `path`, promotes exported ones to entry points,
    /// then expands callees from each symbol.
    pub(super) async fn analyze_file(
        &mut self,
        adapter: &mut Adapter,
        path: &Utf8Path,
    ) -> Result<(), GraphError> {
        let symbols = adapter.file_symbols(path).await?;
        for symbol in &symbols {
            let id = symbol.node.id().clone();
            self.graph.add_node(symbol.node.clone());
            if symbol.exported {
                self.graph.add_entry_point(id);
            }
        }

        for symbol in symbols {
            if self.visited.contains(symbol.node.id()) {
                continue;
            }
            let position = symbol.node.location().position();
            let Some(item) = adapter
                .prepare_call_hierarchy(symbol.node.file_path(), position)
                .await?
            else {
                continue;
            };
            self.traverse(adapter, item, 0, Direction::Callees).await?;
        }
        Ok(())
    }

    /// Expands callers and callees from the symbol at `position`.
    pub(super) async fn analyze_symbol(
        &mut self,
        adapter: &mut Adapter,
        path: &Utf8Path,
        position: Position,
    ) -> Result<(), GraphError> {
        let Some(item) = adapter.prepare_call_hierarchy(path, position).await? else {
            debug!(
                target: BUILDER_TARGET,
                path = %path,
                line = position.line,
                column = position.column,
                "no symbol at pinpoint entry"
            );
            return Ok(());
        };
        self.traverse(adapter, item, 0, Direction::Both).await
    }

    /// Visits `item` and expands it in `direction`.
    ///
    /// Only the root of a pinpoint entry is expanded in both directions;
    /// every recursive call is locked to the direction it descended in.
    fn traverse<'a>(
        &'a mut self,
        adapter: &'a mut Adapter,
        item: CallHierarchyItem,
        depth: u32,
        direction: Direction,
    ) -> TraversalFuture<'a> {
        Box::pin(async move {
            let language = adapter.language().to_owned();
            let node = item.to_node(&language);
            let id = node.id().clone();
            if !self.visited.insert(id.clone()) {
                return Ok(());
            }

            let estimated = self.estimate_depth(&id);
            if estimated > self.max_depth {
                debug!(
                    target: BUILDER_TARGET,
                    node = %id,
                    estimated,
                    max_depth = self.max_depth,
                    "pruning node beyond depth budget"
                );
                return Ok(());
            }
            self.graph.add_node(node);

            let descend = depth.saturating_add(1) < self.max_depth;

            if direction.includes_callees() {
                let outgoing = adapter.outgoing_calls(&item).await?;
                for call in outgoing {
                    let callee = call.to.to_node(&language);
                    let callee_id = callee.id().clone();
                    self.graph.add_node(callee);
                    for site in call_sites(&call.from_ranges, &call.to) {
                        self.graph
                            .add_edge(CallEdge::new(id.clone(), callee_id.clone(), site));
                    }
                    if descend {
                        self.traverse(&mut *adapter, call.to, depth + 1, Direction::Callees)
                            .await?;
                    }
                }
            }

            if direction.includes_callers() {
                let incoming = adapter.incoming_calls(&item).await?;
                for call in incoming {
                    let caller = call.from.to_node(&language);
                    let caller_id = caller.id().clone();
                    self.graph.add_node(caller);
                    for site in call_sites(&call.from_ranges, &call.from) {
                        self.graph
                            .add_edge(CallEdge::new(caller_id.clone(), id.clone(), site));
                    }
                    if descend {
                        self.traverse(&mut *adapter, call.from, depth + 1, Direction::Callers)
                            .await?;
                    }
                }
            }

            Ok(())
        })
    }

    /// Shortest distance from any entry point to `target` over the outgoing
    /// edges materialised so far.
    ///
    /// Returns 0 when no path exists yet, so unconnected nodes are never
    /// pruned. The search stops one level past `max_depth`.
    fn estimate_depth(&self, target: &NodeId) -> u32 {
        let entry_points = self.graph.entry_points();
        if entry_points.contains(target) {
            return 0;
        }

        let mut seen: HashSet<&NodeId> = entry_points.iter().collect();
        let mut frontier: VecDeque<(&NodeId, u32)> =
            entry_points.iter().map(|id| (id, 0)).collect();

        while let Some((current, distance)) = frontier.pop_front() {
            if distance > self.max_depth {
                continue;
            }
            for edge in self.graph.outgoing_edges(current) {
                let next = distance + 1;
                if edge.callee() == target {
                    return next;
                }
                if seen.insert(edge.callee()) {
                    frontier.push_back((edge.callee(), next));
                }
            }
        }
        0
    }
}

/// Call sites for a call, falling back to the counterpart's own position
/// when the adapter reports no ranges.
fn call_sites(ranges: &[Range], counterpart: &CallHierarchyItem) -> Vec<Position> {
    if ranges.is_empty() {
        return vec![counterpart.selection_location.position()];
    }
    ranges.iter().map(|range| range.start).collect()
}
