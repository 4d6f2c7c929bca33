//! Shared configuration for callscope.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a TOML
//! file, then `CALLSCOPE_*` environment variables, then command-line flags.
//! Later layers win. The file is named with `--config-path` or
//! `CALLSCOPE_CONFIG_PATH`.
//!
//! ```toml
//! build_max_depth = 8
//! query_max_depth = 3
//! summary_callee_limit = 5
//! log_filter = "callscope_graph=debug"
//! log_format = "json"
//! ```

mod defaults;
mod logging;
pub mod telemetry;

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_BUILD_MAX_DEPTH, DEFAULT_LOG_FILTER, DEFAULT_QUERY_MAX_DEPTH,
    DEFAULT_SUMMARY_CALLEE_LIMIT, default_build_max_depth, default_log_filter,
    default_log_filter_string, default_log_format, default_query_max_depth,
    default_summary_callee_limit,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Prefix shared by all environment overrides.
pub const ENV_PREFIX: &str = "CALLSCOPE_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered loading failed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Arc<OrthoError>),

    /// Inline TOML is not valid for [`Config`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings for building, querying and logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "CALLSCOPE")]
pub struct Config {
    #[ortho_config(default = default_build_max_depth())]
    build_max_depth: u32,
    #[ortho_config(default = default_query_max_depth())]
    query_max_depth: u32,
    #[ortho_config(default = default_summary_callee_limit())]
    summary_callee_limit: usize,
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_max_depth: default_build_max_depth(),
            query_max_depth: default_query_max_depth(),
            summary_callee_limit: default_summary_callee_limit(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads every layer, taking flags from `args` (program name first).
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a file, variable or flag cannot be
    /// read or does not fit its key.
    pub fn load_layers<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::load_from_iter(args)?)
    }

    /// Traversal depth for graph builds.
    #[must_use]
    pub const fn build_max_depth(&self) -> u32 {
        self.build_max_depth
    }

    /// Walk depth for graph queries.
    #[must_use]
    pub const fn query_max_depth(&self) -> u32 {
        self.query_max_depth
    }

    /// Number of callees listed per symbol in interface summaries.
    #[must_use]
    pub const fn summary_callee_limit(&self) -> usize {
        self.summary_callee_limit
    }

    /// Log filter expression in `tracing_subscriber::EnvFilter` syntax.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
