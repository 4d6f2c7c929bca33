//! Error types for the LSP-backed adapter.

use thiserror::Error;

/// Errors raised by [`crate::CallHierarchyClient`] implementations and by
/// conversions between LSP and graph types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LspAdapterError {
    /// The language server rejected or failed a request.
    #[error("language server request failed: {0}")]
    Request(String),

    /// A path could not be expressed as a `file://` URI.
    #[error("cannot convert path to URI: {0}")]
    InvalidPath(String),

    /// A URI returned by the server could not be parsed.
    #[error("invalid URI: {0}")]
    InvalidUri(String),
}

impl LspAdapterError {
    /// Creates a new `Request` error.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }
}
