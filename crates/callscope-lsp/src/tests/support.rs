//! Scripted language server client for adapter tests.

use std::collections::HashMap;
use std::str::FromStr;

use lsp_types::{
    CallHierarchyIncomingCall, CallHierarchyIncomingCallsParams, CallHierarchyItem,
    CallHierarchyOutgoingCall, CallHierarchyOutgoingCallsParams, CallHierarchyPrepareParams,
    DocumentSymbol, DocumentSymbolParams, DocumentSymbolResponse, Location, Position, Range,
    SymbolInformation, SymbolKind, Uri,
};

use crate::{CallHierarchyClient, LspAdapterError};

pub(super) const MAIN_URI: &str = "file:///ws/src/main.ts";

pub(super) fn uri() -> Uri {
    Uri::from_str(MAIN_URI).expect("valid URI")
}

fn point(line: u32, column: u32) -> Range {
    Range::new(Position::new(line, column), Position::new(line, column + 1))
}

/// Builds an item whose declaration range differs from its name range so
/// tests can tell cached items from rebuilt ones.
pub(super) fn item(name: &str, line: u32, column: u32) -> CallHierarchyItem {
    CallHierarchyItem {
        name: name.to_owned(),
        kind: SymbolKind::FUNCTION,
        tags: None,
        detail: Some(format!("function {name}(): void")),
        uri: uri(),
        range: Range::new(Position::new(line, 0), Position::new(line + 3, 1)),
        selection_range: point(line, column),
        data: None,
    }
}

#[expect(deprecated, reason = "DocumentSymbol still carries the deprecated flag")]
pub(super) fn symbol(
    name: &str,
    kind: SymbolKind,
    line: u32,
    children: Vec<DocumentSymbol>,
) -> DocumentSymbol {
    DocumentSymbol {
        name: name.to_owned(),
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range: Range::new(Position::new(line, 0), Position::new(line + 5, 1)),
        selection_range: point(line, 9),
        children: (!children.is_empty()).then_some(children),
    }
}

#[expect(deprecated, reason = "SymbolInformation still carries the deprecated flag")]
pub(super) fn flat_symbol(
    name: &str,
    kind: SymbolKind,
    line: u32,
    container: Option<&str>,
) -> SymbolInformation {
    SymbolInformation {
        name: name.to_owned(),
        kind,
        tags: None,
        deprecated: None,
        location: Location::new(uri(), point(line, 2)),
        container_name: container.map(str::to_owned),
    }
}

#[derive(Default)]
pub(super) struct ScriptedClient {
    pub(super) prepared: Vec<CallHierarchyItem>,
    pub(super) outgoing: HashMap<String, Vec<CallHierarchyOutgoingCall>>,
    pub(super) incoming: HashMap<String, Vec<CallHierarchyIncomingCall>>,
    pub(super) symbols: Option<DocumentSymbolResponse>,
    pub(super) failing: bool,
    pub(super) root: Option<Uri>,
    pub(super) prepare_requests: Vec<Position>,
    pub(super) sent_items: Vec<CallHierarchyItem>,
    pub(super) shutdowns: usize,
}

impl ScriptedClient {
    fn check(&self) -> Result<(), LspAdapterError> {
        if self.failing {
            return Err(LspAdapterError::request("server crashed"));
        }
        Ok(())
    }
}

impl CallHierarchyClient for ScriptedClient {
    fn initialize(&mut self, root_uri: &Uri) -> Result<(), LspAdapterError> {
        self.check()?;
        self.root = Some(root_uri.clone());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), LspAdapterError> {
        self.shutdowns += 1;
        self.check()
    }

    fn prepare_call_hierarchy(
        &mut self,
        params: CallHierarchyPrepareParams,
    ) -> Result<Option<Vec<CallHierarchyItem>>, LspAdapterError> {
        self.check()?;
        self.prepare_requests
            .push(params.text_document_position_params.position);
        Ok((!self.prepared.is_empty()).then(|| self.prepared.clone()))
    }

    fn incoming_calls(
        &mut self,
        params: CallHierarchyIncomingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyIncomingCall>>, LspAdapterError> {
        self.check()?;
        let calls = self.incoming.get(&params.item.name).cloned();
        self.sent_items.push(params.item);
        Ok(calls)
    }

    fn outgoing_calls(
        &mut self,
        params: CallHierarchyOutgoingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyOutgoingCall>>, LspAdapterError> {
        self.check()?;
        let calls = self.outgoing.get(&params.item.name).cloned();
        self.sent_items.push(params.item);
        Ok(calls)
    }

    fn document_symbols(
        &mut self,
        _params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>, LspAdapterError> {
        self.check()?;
        Ok(self.symbols.clone())
    }
}
