//! Graph construction from build entries.
//!
//! The builder routes each entry to an adapter and expands it:
//!
//! - a bare file path adds every symbol of the file, promotes exported
//!   symbols to entry points and follows callees only;
//! - a `path:line:column` pinpoint resolves one symbol and follows both
//!   callers and callees from it.
//!
//! Entries are processed sequentially and every adapter request is awaited
//! before the next one is issued.

mod progress;
mod traversal;

use std::time::Instant;

use callscope_config::Config;
use camino::Utf8Path;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

pub use progress::{BuildProgress, ProgressPhase};

use crate::adapter::CallGraphAdapter;
use crate::entry::{self, EntrySpec};
use crate::error::GraphError;
use crate::graph::{CallGraph, GraphMetadata};
use crate::registry::AdapterRegistry;
use traversal::Traversal;

/// Log target for build operations.
pub(crate) const BUILDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::builder");

/// Default traversal depth for builds.
pub const DEFAULT_BUILD_DEPTH: u32 = 10;

/// Parameters of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    entries: Vec<String>,
    max_depth: u32,
}

impl BuildOptions {
    /// Creates options for `entries` with the default depth.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            max_depth: DEFAULT_BUILD_DEPTH,
        }
    }

    /// Creates options for `entries` with the configured depth.
    #[must_use]
    pub fn from_config<I, S>(config: &Config, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(entries).with_max_depth(config.build_max_depth())
    }

    /// Sets the traversal depth budget.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the entry strings.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the traversal depth budget.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

/// Builds call graphs by driving registered adapters.
///
/// Builds take `&mut self`, so one builder never runs two builds at once.
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    registry: AdapterRegistry,
}

impl CallGraphBuilder {
    /// Creates a builder with no adapters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing registry.
    #[must_use]
    pub const fn with_registry(registry: AdapterRegistry) -> Self {
        Self { registry }
    }

    /// Registers an adapter, replacing any adapter for the same language.
    pub fn register_adapter(&mut self, adapter: Box<dyn CallGraphAdapter>) {
        self.registry.register(adapter);
    }

    /// Returns the adapter registry.
    #[must_use]
    pub const fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Builds a graph without progress reporting.
    ///
    /// # Errors
    /// Returns the first adapter error; see [`Self::build_with_progress`].
    pub async fn build(&mut self, options: &BuildOptions) -> Result<CallGraph, GraphError> {
        self.build_with_progress(options, |_| {}).await
    }

    /// Builds a graph, reporting progress to `on_progress`.
    ///
    /// Every registered adapter is initialised with the root derived from the
    /// first entry and is shut down exactly once afterwards, whether or not
    /// the build succeeded. Entries without a file or a supporting adapter
    /// are skipped.
    ///
    /// # Errors
    /// Any adapter error aborts the whole build and is returned after all
    /// adapters have been shut down. When the build itself succeeds, the
    /// first shutdown error is returned instead.
    pub async fn build_with_progress<F>(
        &mut self,
        options: &BuildOptions,
        mut on_progress: F,
    ) -> Result<CallGraph, GraphError>
    where
        F: FnMut(&BuildProgress) + Send,
    {
        let started = Instant::now();
        let root = entry::root_path(options.entries.first().map(String::as_str));
        let mut traversal = Traversal::new(options.max_depth);

        let outcome = self
            .run(&root, options, &mut traversal, &mut on_progress)
            .await;
        let shutdown = self.shutdown_adapters().await;
        outcome?;
        shutdown?;

        let (mut graph, files_analyzed) = traversal.finish();
        let metadata = GraphMetadata {
            build_time: OffsetDateTime::now_utc(),
            build_duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            files_analyzed,
        };
        info!(
            target: BUILDER_TARGET,
            nodes = metadata.node_count,
            edges = metadata.edge_count,
            files = metadata.files_analyzed,
            duration_ms = metadata.build_duration_ms,
            "call graph built"
        );
        on_progress(&BuildProgress {
            phase: ProgressPhase::Complete,
            current_file: None,
            files_processed: files_analyzed,
            total_files: options.entries.len(),
            nodes_discovered: metadata.node_count,
            edges_discovered: metadata.edge_count,
        });
        graph.set_metadata(metadata);
        Ok(graph)
    }

    async fn run<F>(
        &mut self,
        root: &Utf8Path,
        options: &BuildOptions,
        traversal: &mut Traversal,
        on_progress: &mut F,
    ) -> Result<(), GraphError>
    where
        F: FnMut(&BuildProgress) + Send,
    {
        for adapter in self.registry.iter_mut() {
            adapter.initialize(root).await?;
        }

        let total = options.entries.len();
        for entry in &options.entries {
            on_progress(&traversal.progress(ProgressPhase::Scanning, Some(entry), total));
            self.process_entry(entry, traversal).await?;
            on_progress(&traversal.progress(ProgressPhase::Analyzing, Some(entry), total));
        }
        Ok(())
    }

    async fn process_entry(
        &mut self,
        entry: &str,
        traversal: &mut Traversal,
    ) -> Result<(), GraphError> {
        let Some(spec) = entry::parse_entry(entry) else {
            debug!(target: BUILDER_TARGET, entry, "skipping entry with no file");
            return Ok(());
        };
        let Some(adapter) = self.registry.adapter_for_file_mut(spec.path()) else {
            debug!(target: BUILDER_TARGET, entry, "skipping entry with no adapter");
            return Ok(());
        };

        traversal.record_file();
        match spec {
            EntrySpec::File(path) => traversal.analyze_file(adapter, &path).await,
            EntrySpec::Pinpoint { path, position } => {
                traversal.analyze_symbol(adapter, &path, position).await
            }
        }
    }

    async fn shutdown_adapters(&mut self) -> Result<(), GraphError> {
        let mut first_error = None;
        for adapter in self.registry.iter_mut() {
            if let Err(error) = adapter.shutdown().await {
                warn!(
                    target: BUILDER_TARGET,
                    language = adapter.language(),
                    %error,
                    "adapter shutdown failed"
                );
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
