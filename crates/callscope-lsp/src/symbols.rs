//! Flattening of `textDocument/documentSymbol` responses.
//!
//! Only callable symbols become [`FileSymbol`]s. In nested responses a
//! callable is exported unless it is declared inside another callable; flat
//! responses carry no nesting, so every callable in them is exported.
//!
//! Flat entries only carry the declaration range. The adapter resolves the
//! position of each name before handing it to `flat_symbol`.

use callscope_graph::{CallNode, FileSymbol, Location};
use camino::Utf8Path;
use lsp_types::{self as lsp, DocumentSymbol, SymbolInformation};

use crate::convert::{from_lsp_kind, from_lsp_position, is_callable};

pub(crate) fn nested(tree: &[DocumentSymbol], path: &Utf8Path, language: &str) -> Vec<FileSymbol> {
    let mut symbols = Vec::new();
    collect_nested(tree, path, language, None, false, &mut symbols);
    symbols
}

fn collect_nested(
    tree: &[DocumentSymbol],
    path: &Utf8Path,
    language: &str,
    container: Option<&str>,
    inside_callable: bool,
    out: &mut Vec<FileSymbol>,
) {
    for symbol in tree {
        let callable = is_callable(symbol.kind);
        if callable {
            let location = Location::new(path, from_lsp_position(symbol.selection_range.start));
            let mut node =
                CallNode::new(&symbol.name, from_lsp_kind(symbol.kind), location, language);
            if let Some(parent) = container {
                node = node.with_qualified_name(format!("{parent}.{}", symbol.name));
            }
            if let Some(detail) = &symbol.detail {
                node = node.with_signature(detail.clone());
            }
            out.push(FileSymbol::new(node, !inside_callable));
        }
        if let Some(children) = &symbol.children {
            collect_nested(
                children,
                path,
                language,
                Some(&symbol.name),
                inside_callable || callable,
                out,
            );
        }
    }
}

/// Builds the exported symbol for a flat entry whose name starts at `name_start`.
pub(crate) fn flat_symbol(
    info: &SymbolInformation,
    path: &Utf8Path,
    name_start: lsp::Position,
    language: &str,
) -> FileSymbol {
    let location = Location::new(path, from_lsp_position(name_start));
    let node = CallNode::new(&info.name, from_lsp_kind(info.kind), location, language);
    let qualified = match &info.container_name {
        Some(parent) => node.with_qualified_name(format!("{parent}.{}", info.name)),
        None => node,
    };
    FileSymbol::new(qualified, true)
}
