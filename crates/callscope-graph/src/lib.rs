//! Call graph construction and querying for callscope.
//!
//! This crate turns source files into a call graph through pluggable
//! per-language adapters and answers questions about the result:
//!
//! - **Build**: [`CallGraphBuilder`] routes entries (whole files or
//!   `path:line:column` pinpoints) to a registered [`CallGraphAdapter`] and
//!   materialises a deduplicated, bidirectionally indexed [`CallGraph`]
//!   under a depth budget.
//! - **Query**: [`query`] extracts a filtered, direction-aware subgraph
//!   around a root symbol.
//! - **Dependencies**: [`extract_dependencies`] computes the forward closure
//!   of a symbol and the files it touches.
//! - **Summary**: [`render_interface_summary`] renders exported symbols as
//!   markdown.
//!
//! # Adapters
//!
//! The [`CallGraphAdapter`] trait mirrors LSP call hierarchy requests, so a
//! language server client can back it directly; static extractors implement
//! the same contract.
//!
//! # Example
//!
//! ```ignore
//! use callscope_graph::{BuildOptions, CallGraphBuilder, Direction, QueryOptions, query};
//!
//! let mut builder = CallGraphBuilder::new();
//! builder.register_adapter(Box::new(typescript_adapter));
//!
//! let graph = builder.build(&BuildOptions::new(["src/main.ts"])).await?;
//! let result = query(&graph, &QueryOptions::new("main").with_direction(Direction::Callees))?;
//! for path in &result.paths {
//!     // Process path
//! }
//! ```

mod adapter;
mod builder;
mod dependencies;
mod direction;
mod edge;
mod entry;
mod error;
mod graph;
mod node;
mod query;
mod registry;
mod summary;

pub use adapter::{
    CallGraphAdapter, CallHierarchyItem, FileSymbol, IncomingCall, OutgoingCall, Range,
};
pub use builder::{
    BuildOptions, BuildProgress, CallGraphBuilder, DEFAULT_BUILD_DEPTH, ProgressPhase,
};
pub use dependencies::{Dependencies, extract_dependencies};
pub use direction::Direction;
pub use edge::CallEdge;
pub use entry::{EntrySpec, parse_entry, root_path};
pub use error::GraphError;
pub use graph::{CallGraph, GraphMetadata};
pub use node::{CallNode, Location, NodeId, Position, SymbolKind};
pub use query::{DEFAULT_QUERY_DEPTH, QueryOptions, QueryPath, QueryResult, query};
pub use registry::AdapterRegistry;
pub use summary::{DEFAULT_CALLEE_LIMIT, SummaryOptions, render_interface_summary};
