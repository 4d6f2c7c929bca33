//! Traversal direction shared by the builder and the query engine.

use strum::{Display, EnumString};

/// Which call relationships a traversal follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    /// Follow incoming edges: who calls the symbol.
    Callers,
    /// Follow outgoing edges: what the symbol calls.
    Callees,
    /// Follow both.
    #[default]
    Both,
}

impl Direction {
    /// Returns whether outgoing edges are followed.
    #[must_use]
    pub const fn includes_callees(self) -> bool {
        matches!(self, Self::Callees | Self::Both)
    }

    /// Returns whether incoming edges are followed.
    #[must_use]
    pub const fn includes_callers(self) -> bool {
        matches!(self, Self::Callers | Self::Both)
    }
}
