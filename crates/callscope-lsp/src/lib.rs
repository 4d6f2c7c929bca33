//! Language server backed adapters for callscope.
//!
//! [`LspCallGraphAdapter`] implements
//! [`callscope_graph::CallGraphAdapter`] on top of any
//! [`CallHierarchyClient`], translating between zero-based LSP positions and
//! the one-based positions stored in the graph. Whole-file analysis uses
//! `textDocument/documentSymbol`; every other request maps onto the
//! `textDocument/callHierarchy` family.

mod adapter;
mod client;
mod convert;
mod error;
mod symbols;
mod uri;

pub use adapter::LspCallGraphAdapter;
pub use client::CallHierarchyClient;
pub use error::LspAdapterError;

#[cfg(test)]
mod tests;
