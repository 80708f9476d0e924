use crate::config::default_check_interval_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Background storage watch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Time between availability checks while not recording.
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
}

impl TransferConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
        }
    }
}
