//! [`CallGraphAdapter`] implementation over a [`CallHierarchyClient`].

use std::collections::HashMap;

use async_trait::async_trait;
use callscope_graph::{
    CallGraphAdapter, CallHierarchyItem, FileSymbol, GraphError, IncomingCall, OutgoingCall,
    Position,
};
use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::{
    self as lsp, CallHierarchyIncomingCallsParams, CallHierarchyOutgoingCallsParams,
    CallHierarchyPrepareParams, DocumentSymbolParams, DocumentSymbolResponse,
    PartialResultParams, SymbolInformation, TextDocumentIdentifier, TextDocumentPositionParams,
    WorkDoneProgressParams,
};
use tracing::debug;

use crate::client::CallHierarchyClient;
use crate::convert::{
    from_lsp_range, is_callable, item_from_lsp, item_to_lsp, to_lsp_position,
};
use crate::error::LspAdapterError;
use crate::symbols;
use crate::uri::path_to_uri;

const ADAPTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::adapter");

/// Identifies a server-issued item by where its name sits.
type ItemKey = (Utf8PathBuf, Position, String);

/// A language adapter backed by a language server.
///
/// Items handed out by the server are cached so that follow-up requests send
/// them back unchanged, including any opaque `data` payload.
pub struct LspCallGraphAdapter<C> {
    language: String,
    extensions: Vec<String>,
    client: C,
    items: HashMap<ItemKey, lsp::CallHierarchyItem>,
}

impl<C> LspCallGraphAdapter<C> {
    /// Creates an adapter for `language` that claims files with any of the
    /// given extensions (without the leading dot).
    #[must_use]
    pub fn new<I, S>(language: impl Into<String>, extensions: I, client: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language: language.into(),
            extensions: extensions
                .into_iter()
                .map(|ext| ext.into().to_ascii_lowercase())
                .collect(),
            client,
            items: HashMap::new(),
        }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    fn error(&self, error: &LspAdapterError) -> GraphError {
        GraphError::adapter(&self.language, error.to_string())
    }

    fn remember(&mut self, item: &lsp::CallHierarchyItem) -> CallHierarchyItem {
        let converted = item_from_lsp(item);
        self.items.insert(key_of(&converted), item.clone());
        converted
    }

    fn lsp_item(&self, item: &CallHierarchyItem) -> Result<lsp::CallHierarchyItem, GraphError> {
        match self.items.get(&key_of(item)) {
            Some(cached) => Ok(cached.clone()),
            None => item_to_lsp(item).map_err(|err| self.error(&err)),
        }
    }

    fn document_uri(&self, path: &Utf8Path) -> Result<(Utf8PathBuf, lsp::Uri), GraphError> {
        let absolute = absolute(path).map_err(|err| self.error(&err))?;
        let uri = path_to_uri(&absolute).map_err(|err| self.error(&err))?;
        Ok((absolute, uri))
    }
}

impl<C: CallHierarchyClient> LspCallGraphAdapter<C> {
    fn prepare(
        &mut self,
        uri: lsp::Uri,
        position: lsp::Position,
    ) -> Result<Vec<lsp::CallHierarchyItem>, GraphError> {
        let params = CallHierarchyPrepareParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri },
                position,
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
        };
        Ok(self
            .client
            .prepare_call_hierarchy(params)
            .map_err(|err| self.error(&err))?
            .unwrap_or_default())
    }

    /// Finds where the name of a flat entry starts.
    ///
    /// The server is asked for the item at the start of the declaration; an
    /// item with the same name supplies its selection range. Without one the
    /// declaration start is used.
    fn name_start(&mut self, info: &SymbolInformation) -> Result<lsp::Position, GraphError> {
        let declared = info.location.range.start;
        let items = self.prepare(info.location.uri.clone(), declared)?;
        let Some(named) = items.iter().find(|item| item.name == info.name) else {
            return Ok(declared);
        };
        self.remember(named);
        Ok(named.selection_range.start)
    }

    fn flat_symbols(
        &mut self,
        list: &[SymbolInformation],
        path: &Utf8Path,
    ) -> Result<Vec<FileSymbol>, GraphError> {
        let mut found = Vec::new();
        for info in list.iter().filter(|info| is_callable(info.kind)) {
            let start = self.name_start(info)?;
            found.push(symbols::flat_symbol(info, path, start, &self.language));
        }
        Ok(found)
    }
}

fn key_of(item: &CallHierarchyItem) -> ItemKey {
    (
        item.selection_location.file_path.clone(),
        item.selection_location.position(),
        item.name.clone(),
    )
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, LspAdapterError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    path.canonicalize_utf8()
        .map_err(|_| LspAdapterError::InvalidPath(path.to_string()))
}

#[async_trait]
impl<C> CallGraphAdapter for LspCallGraphAdapter<C>
where
    C: CallHierarchyClient + Send + Sync,
{
    fn language(&self) -> &str {
        &self.language
    }

    fn supports_file(&self, path: &Utf8Path) -> bool {
        path.extension().is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    async fn initialize(&mut self, root_path: &Utf8Path) -> Result<(), GraphError> {
        let (_, uri) = self.document_uri(root_path)?;
        debug!(
            target: ADAPTER_TARGET,
            language = %self.language,
            root = uri.as_str(),
            "starting language server"
        );
        self.client
            .initialize(&uri)
            .map_err(|err| GraphError::adapter(&self.language, err.to_string()))
    }

    async fn shutdown(&mut self) -> Result<(), GraphError> {
        self.items.clear();
        debug!(
            target: ADAPTER_TARGET,
            language = %self.language,
            "stopping language server"
        );
        self.client
            .shutdown()
            .map_err(|err| GraphError::adapter(&self.language, err.to_string()))
    }

    async fn prepare_call_hierarchy(
        &mut self,
        path: &Utf8Path,
        position: Position,
    ) -> Result<Option<CallHierarchyItem>, GraphError> {
        let (_, uri) = self.document_uri(path)?;
        let items = self.prepare(uri, to_lsp_position(position))?;
        Ok(items.first().map(|item| self.remember(item)))
    }

    async fn file_symbols(&mut self, path: &Utf8Path) -> Result<Vec<FileSymbol>, GraphError> {
        let (absolute, uri) = self.document_uri(path)?;
        let params = DocumentSymbolParams {
            text_document: TextDocumentIdentifier { uri },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let response = self
            .client
            .document_symbols(params)
            .map_err(|err| GraphError::adapter(&self.language, err.to_string()))?;
        let found = match response {
            Some(DocumentSymbolResponse::Nested(tree)) => {
                symbols::nested(&tree, &absolute, &self.language)
            }
            Some(DocumentSymbolResponse::Flat(list)) => self.flat_symbols(&list, &absolute)?,
            None => Vec::new(),
        };
        debug!(
            target: ADAPTER_TARGET,
            file = %absolute,
            symbols = found.len(),
            "listed document symbols"
        );
        Ok(found)
    }

    async fn outgoing_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<OutgoingCall>, GraphError> {
        let params = CallHierarchyOutgoingCallsParams {
            item: self.lsp_item(item)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let calls = self
            .client
            .outgoing_calls(params)
            .map_err(|err| GraphError::adapter(&self.language, err.to_string()))?
            .unwrap_or_default();
        Ok(calls
            .iter()
            .map(|call| OutgoingCall {
                to: self.remember(&call.to),
                from_ranges: call.from_ranges.iter().copied().map(from_lsp_range).collect(),
            })
            .collect())
    }

    async fn incoming_calls(
        &mut self,
        item: &CallHierarchyItem,
    ) -> Result<Vec<IncomingCall>, GraphError> {
        let params = CallHierarchyIncomingCallsParams {
            item: self.lsp_item(item)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let calls = self
            .client
            .incoming_calls(params)
            .map_err(|err| GraphError::adapter(&self.language, err.to_string()))?
            .unwrap_or_default();
        Ok(calls
            .iter()
            .map(|call| IncomingCall {
                from: self.remember(&call.from),
                from_ranges: call.from_ranges.iter().copied().map(from_lsp_range).collect(),
            })
            .collect())
    }
}
