//! Error types for call graph operations.

use thiserror::Error;

/// Errors returned by call graph operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A query entry matched no node ID, qualified name or name.
    #[error("no symbol matches '{entry}'")]
    RootNotFound {
        /// The entry string that failed to resolve.
        entry: String,
    },

    /// A language adapter failed while serving a request.
    #[error("{language} adapter failed: {message}")]
    Adapter {
        /// Language tag of the failing adapter.
        language: String,
        /// Description of the failure.
        message: String,
    },
}

impl GraphError {
    /// Creates a new `RootNotFound` error.
    #[must_use]
    pub fn root_not_found(entry: impl Into<String>) -> Self {
        Self::RootNotFound {
            entry: entry.into(),
        }
    }

    /// Creates a new `Adapter` error.
    #[must_use]
    pub fn adapter(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            language: language.into(),
            message: message.into(),
        }
    }
}
