use crate::config::{DEBUG_LOG_FILTER, default_log_filter};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log filter and optional log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Raise both crates to debug regardless of `filter`.
    #[serde(default)]
    pub debug: bool,
    /// Directory for a daily rolling log file. Console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Filter directive after applying the debug switch.
    pub fn effective_filter(&self) -> &str {
        if self.debug {
            DEBUG_LOG_FILTER
        } else {
            &self.filter
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            debug: false,
            directory: None,
        }
    }
}
