//! The per-language adapter contract.
//!
//! An adapter extracts symbols and call relationships for one language. The
//! request shapes mirror LSP's `textDocument/callHierarchy` family so that an
//! adapter can wrap a language server client with little more than type
//! conversion, but static extractors implement the same trait.

use async_trait::async_trait;
use camino::Utf8Path;

use crate::error::GraphError;
use crate::node::{CallNode, Location, Position, SymbolKind};

/// A span of source text within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// An adapter-native handle describing a located symbol.
///
/// Items are handed back to the adapter to request further calls and are
/// never stored in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHierarchyItem {
    /// Symbol name.
    pub name: String,
    /// Extra detail, usually a signature.
    pub detail: Option<String>,
    /// Kind of symbol.
    pub kind: SymbolKind,
    /// Location of the whole declaration.
    pub location: Location,
    /// Location of the symbol's name; node identity derives from this.
    pub selection_location: Location,
}

impl CallHierarchyItem {
    /// Creates an item whose declaration and name share one location.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: Location) -> Self {
        Self {
            name: name.into(),
            detail: None,
            kind,
            selection_location: location.clone(),
            location,
        }
    }

    /// Attaches detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Converts the item into a graph node attributed to `language`.
    #[must_use]
    pub fn to_node(&self, language: &str) -> CallNode {
        let node = CallNode::new(
            &self.name,
            self.kind,
            self.selection_location.clone(),
            language,
        );
        match &self.detail {
            Some(detail) => node.with_signature(detail.clone()),
            None => node,
        }
    }
}

/// A call made by an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingCall {
    /// The called symbol.
    pub to: CallHierarchyItem,
    /// Call expressions inside the caller that target `to`.
    pub from_ranges: Vec<Range>,
}

/// A call received by an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingCall {
    /// The calling symbol.
    pub from: CallHierarchyItem,
    /// Call expressions inside `from` that target the item.
    pub from_ranges: Vec<Range>,
}

/// A symbol declared in a file, as reported by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSymbol {
    /// The symbol as a graph node.
    pub node: CallNode,
    /// Whether the symbol is visible outside its module.
    pub exported: bool,
}

impl FileSymbol {
    /// Creates a new file symbol.
    #[must_use]
    pub const fn new(node: CallNode, exported: bool) -> Self {
        Self { node, exported }
    }
}

/// Symbol and call extraction for one language.
///
/// The builder drives an adapter through `initialize` once, any number of
/// requests, then `shutdown` once. Requests are issued sequentially.
#[async_trait]
pub trait CallGraphAdapter: Send + Sync {
    /// Language tag; the registry key for this adapter.
    fn language(&self) -> &str;

    /// Returns whether this adapter can analyse `path`.
    fn supports_file(&self, path: &Utf8Path) -> bool;

    /// Prepares the adapter for requests rooted at `root_path`.
    ///
    /// # Errors
    /// Returns an error if the backing analyser cannot start.
    async fn initialize(&mut self, root_path: &Utf8Path) -> Result<(), GraphError>;

    /// Releases resources acquired by `initialize`.
    ///
    /// # Errors
    /// Returns an error if the backing analyser fails to stop cleanly.
    async fn shutdown(&mut self) -> Result<(), GraphError>;

    /// Resolves the symbol at a one-based position.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    async fn prepare_call_hierarchy(
        &mut self,
        path: &Utf8Path,
        position: Position,
    ) -> Result<Option<CallHierarchyItem>, GraphError>;

    /// Lists callable symbols declared in `path`.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    async fn file_symbols(&mut self, path: &Utf8Path) -> Result<Vec<FileSymbol>, GraphError>;

    /// Lists calls made by `item`.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    async fn outgoing_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<OutgoingCall>, GraphError>;

    /// Lists calls made to `item`.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    async fn incoming_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<IncomingCall>, GraphError>;
}
