use crate::logging::LogFormat;

/// Default traversal depth for graph builds.
pub const DEFAULT_BUILD_MAX_DEPTH: u32 = 10;

/// Default walk depth for graph queries.
pub const DEFAULT_QUERY_MAX_DEPTH: u32 = 5;

/// Default number of callees listed per symbol in interface summaries.
pub const DEFAULT_SUMMARY_CALLEE_LIMIT: usize = 5;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default traversal depth for graph builds.
#[must_use]
pub const fn default_build_max_depth() -> u32 {
    DEFAULT_BUILD_MAX_DEPTH
}

/// Default walk depth for graph queries.
#[must_use]
pub const fn default_query_max_depth() -> u32 {
    DEFAULT_QUERY_MAX_DEPTH
}

/// Default number of callees listed per symbol.
#[must_use]
pub const fn default_summary_callee_limit() -> usize {
    DEFAULT_SUMMARY_CALLEE_LIMIT
}

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
