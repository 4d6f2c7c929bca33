//! Call graph edge representation.

use crate::node::{NodeId, Position};

/// An edge in the call graph representing a call relationship.
///
/// Edges are directed from caller to callee. The call site is the location
/// of the call expression inside the caller, not the callee's definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    caller: NodeId,
    callee: NodeId,
    call_site: Position,
}

/// Identity of an edge for deduplication purposes.
pub(crate) type EdgeKey = (NodeId, NodeId, u32, u32);

impl CallEdge {
    /// Creates a new call edge.
    #[must_use]
    pub const fn new(from_caller: NodeId, to_callee: NodeId, call_site: Position) -> Self {
        Self {
            caller: from_caller,
            callee: to_callee,
            call_site,
        }
    }

    /// Returns the caller node ID.
    #[must_use]
    pub const fn caller(&self) -> &NodeId {
        &self.caller
    }

    /// Returns the callee node ID.
    #[must_use]
    pub const fn callee(&self) -> &NodeId {
        &self.callee
    }

    /// Returns the position of the call expression.
    #[must_use]
    pub const fn call_site(&self) -> Position {
        self.call_site
    }

    pub(crate) fn key(&self) -> EdgeKey {
        (
            self.caller.clone(),
            self.callee.clone(),
            self.call_site.line,
            self.call_site.column,
        )
    }
}
