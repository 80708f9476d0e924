use crate::config::{
    default_gpio_path, default_lifted_level, default_poll_interval_ms, default_settle_ms,
};

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Handset switch wiring and sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// GPIO `value` file of the hook switch.
    #[serde(default = "default_gpio_path")]
    pub gpio_path: PathBuf,
    /// Level (0 or 1) read while the handset is lifted.
    #[serde(default = "default_lifted_level")]
    pub lifted_level: u8,
    /// Debounce settle time; values under 40ms are raised to 40ms.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Sleep between two polls of a wait.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl HookConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            gpio_path: default_gpio_path(),
            lifted_level: default_lifted_level(),
            settle_ms: default_settle_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
