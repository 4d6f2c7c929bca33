//! Build progress reporting.

/// Stage of a build reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// An entry is about to be analysed.
    Scanning,
    /// An entry has been analysed.
    Analyzing,
    /// The build finished.
    Complete,
}

/// Snapshot of build progress with cumulative counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProgress {
    /// Current stage.
    pub phase: ProgressPhase,
    /// Entry being processed, absent for [`ProgressPhase::Complete`].
    pub current_file: Option<String>,
    /// Entries handed to an adapter so far.
    pub files_processed: usize,
    /// Total number of entries in the build.
    pub total_files: usize,
    /// Nodes in the graph so far.
    pub nodes_discovered: usize,
    /// Edges in the graph so far.
    pub edges_discovered: usize,
}
