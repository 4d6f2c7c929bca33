//! Markdown summary of a graph's exported interface.

use std::collections::{BTreeMap, HashSet};

use callscope_config::Config;
use camino::Utf8Path;

use crate::graph::CallGraph;
use crate::node::{CallNode, SymbolKind};

/// Default number of callees listed per symbol.
pub const DEFAULT_CALLEE_LIMIT: usize = 5;

/// Rendering parameters for [`render_interface_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    callee_limit: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            callee_limit: DEFAULT_CALLEE_LIMIT,
        }
    }
}

impl SummaryOptions {
    /// Creates options with the configured callee limit.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            callee_limit: config.summary_callee_limit(),
        }
    }

    /// Sets how many callee names are listed before eliding the rest.
    #[must_use]
    pub const fn with_callee_limit(mut self, callee_limit: usize) -> Self {
        self.callee_limit = callee_limit;
        self
    }
}

const fn glyph(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Function => "ƒ",
        SymbolKind::Method => "◆",
        SymbolKind::Constructor => "⊕",
        SymbolKind::Property => "●",
        SymbolKind::Unknown => "○",
    }
}

/// Renders the graph's entry points as markdown, grouped by file.
///
/// Each symbol lists a bounded number of callees but only a count of its
/// callers. Entry point IDs missing from the node table are skipped.
#[must_use]
pub fn render_interface_summary(graph: &CallGraph, options: &SummaryOptions) -> String {
    let mut by_file: BTreeMap<&Utf8Path, Vec<&CallNode>> = BTreeMap::new();
    for id in graph.entry_points() {
        if let Some(node) = graph.node(id) {
            by_file.entry(node.file_path()).or_default().push(node);
        }
    }

    let mut out = String::from("# Interface Summary\n");
    if by_file.is_empty() {
        out.push_str("\n_No exported symbols._\n");
        return out;
    }
    for (file, nodes) in by_file {
        out.push_str(&format!("\n## `{file}`\n"));
        for node in nodes {
            render_node(&mut out, graph, node, options.callee_limit);
        }
    }
    out
}

fn render_node(out: &mut String, graph: &CallGraph, node: &CallNode, callee_limit: usize) {
    out.push_str(&format!(
        "\n### {} `{}`\n",
        glyph(node.kind()),
        node.qualified_name()
    ));
    if let Some(signature) = node.signature() {
        out.push_str(&format!("\n```{}\n{signature}\n```\n", node.language()));
    }
    if let Some(documentation) = node.documentation() {
        out.push_str(&format!("\n{documentation}\n"));
    }

    let callees: Vec<&str> = graph.callees_of(node.id()).map(CallNode::name).collect();
    let mut distinct: Vec<&str> = Vec::with_capacity(callees.len());
    for name in callees {
        if !distinct.contains(&name) {
            distinct.push(name);
        }
    }
    if !distinct.is_empty() {
        let shown: Vec<&str> = distinct.iter().copied().take(callee_limit).collect();
        let ellipsis = if distinct.len() > callee_limit { ", …" } else { "" };
        out.push_str(&format!("\n**Calls:** {}{ellipsis}\n", shown.join(", ")));
    }

    let callers = graph
        .incoming_edges(node.id())
        .iter()
        .map(|edge| edge.caller())
        .collect::<HashSet<_>>()
        .len();
    if callers > 0 {
        let noun = if callers == 1 { "caller" } else { "callers" };
        out.push_str(&format!("\n**Called by:** {callers} {noun}\n"));
    }
}
