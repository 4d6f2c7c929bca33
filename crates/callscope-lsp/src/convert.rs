//! Translation between LSP call hierarchy types and graph types.
//!
//! LSP positions are zero-based while graph positions are one-based.

use callscope_graph::{CallHierarchyItem, Location, Position, Range, SymbolKind};
use lsp_types::{self as lsp, Uri};

use crate::error::LspAdapterError;
use crate::uri::{path_to_uri, uri_to_path};

pub(crate) const fn to_lsp_position(position: Position) -> lsp::Position {
    lsp::Position {
        line: position.line.saturating_sub(1),
        character: position.column.saturating_sub(1),
    }
}

pub(crate) const fn from_lsp_position(position: lsp::Position) -> Position {
    Position::new(
        position.line.saturating_add(1),
        position.character.saturating_add(1),
    )
}

pub(crate) const fn from_lsp_range(range: lsp::Range) -> Range {
    Range::new(from_lsp_position(range.start), from_lsp_position(range.end))
}

/// Maps LSP symbol kinds onto the callable kinds tracked by the graph.
pub(crate) const fn from_lsp_kind(kind: lsp::SymbolKind) -> SymbolKind {
    match kind {
        lsp::SymbolKind::FUNCTION => SymbolKind::Function,
        lsp::SymbolKind::METHOD => SymbolKind::Method,
        lsp::SymbolKind::CONSTRUCTOR => SymbolKind::Constructor,
        lsp::SymbolKind::PROPERTY => SymbolKind::Property,
        _ => SymbolKind::Unknown,
    }
}

pub(crate) const fn to_lsp_kind(kind: SymbolKind) -> lsp::SymbolKind {
    match kind {
        SymbolKind::Function | SymbolKind::Unknown => lsp::SymbolKind::FUNCTION,
        SymbolKind::Method => lsp::SymbolKind::METHOD,
        SymbolKind::Constructor => lsp::SymbolKind::CONSTRUCTOR,
        SymbolKind::Property => lsp::SymbolKind::PROPERTY,
    }
}

/// Returns whether `kind` names something that can appear in a call graph.
pub(crate) const fn is_callable(kind: lsp::SymbolKind) -> bool {
    matches!(
        kind,
        lsp::SymbolKind::FUNCTION | lsp::SymbolKind::METHOD | lsp::SymbolKind::CONSTRUCTOR
    )
}

pub(crate) fn location(uri: &Uri, position: lsp::Position) -> Location {
    Location::new(uri_to_path(uri), from_lsp_position(position))
}

pub(crate) fn item_from_lsp(item: &lsp::CallHierarchyItem) -> CallHierarchyItem {
    CallHierarchyItem {
        name: item.name.clone(),
        detail: item.detail.clone(),
        kind: from_lsp_kind(item.kind),
        location: location(&item.uri, item.range.start),
        selection_location: location(&item.uri, item.selection_range.start),
    }
}

/// Rebuilds an LSP item for an item the server never handed out.
pub(crate) fn item_to_lsp(
    item: &CallHierarchyItem,
) -> Result<lsp::CallHierarchyItem, LspAdapterError> {
    let uri = path_to_uri(&item.selection_location.file_path)?;
    let start = to_lsp_position(item.location.position());
    let selection = to_lsp_position(item.selection_location.position());
    Ok(lsp::CallHierarchyItem {
        name: item.name.clone(),
        kind: to_lsp_kind(item.kind),
        tags: None,
        detail: item.detail.clone(),
        uri,
        range: lsp::Range::new(start, start),
        selection_range: lsp::Range::new(selection, selection),
        data: None,
    })
}
