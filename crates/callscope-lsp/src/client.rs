//! Client abstraction for the LSP requests the adapter needs.

use lsp_types::{
    CallHierarchyIncomingCall, CallHierarchyIncomingCallsParams, CallHierarchyItem,
    CallHierarchyOutgoingCall, CallHierarchyOutgoingCallsParams, CallHierarchyPrepareParams,
    DocumentSymbolParams, DocumentSymbolResponse, Uri,
};

use crate::error::LspAdapterError;

/// Client abstraction for LSP call hierarchy operations.
///
/// This trait enables testing with scripted clients and abstracts over
/// different LSP client implementations. Calls are blocking; the adapter
/// issues them one at a time.
pub trait CallHierarchyClient {
    /// Starts the server session for the workspace at `root_uri`.
    ///
    /// # Errors
    /// Returns an error if the server cannot be started or initialised.
    fn initialize(&mut self, root_uri: &Uri) -> Result<(), LspAdapterError>;

    /// Ends the server session.
    ///
    /// # Errors
    /// Returns an error if the server does not shut down cleanly.
    fn shutdown(&mut self) -> Result<(), LspAdapterError>;

    /// Prepares call hierarchy items at the given position.
    ///
    /// # Errors
    /// Returns an error if the LSP request fails.
    fn prepare_call_hierarchy(
        &mut self,
        params: CallHierarchyPrepareParams,
    ) -> Result<Option<Vec<CallHierarchyItem>>, LspAdapterError>;

    /// Gets incoming calls for the given item.
    ///
    /// # Errors
    /// Returns an error if the LSP request fails.
    fn incoming_calls(
        &mut self,
        params: CallHierarchyIncomingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyIncomingCall>>, LspAdapterError>;

    /// Gets outgoing calls for the given item.
    ///
    /// # Errors
    /// Returns an error if the LSP request fails.
    fn outgoing_calls(
        &mut self,
        params: CallHierarchyOutgoingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyOutgoingCall>>, LspAdapterError>;

    /// Lists the symbols declared in a document.
    ///
    /// # Errors
    /// Returns an error if the LSP request fails.
    fn document_symbols(
        &mut self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>, LspAdapterError>;
}
