use crate::config::{default_greeting, default_index_files, default_system_volume};

use std::path::PathBuf;

use guestbook_core::ReservedNames;
use serde::{Deserialize, Serialize};

/// Location of the recordings volume and the names reserved on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the greeting and the recordings.
    pub root: PathBuf,
    /// Greeting played before recording.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Index artifacts that are never played.
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    /// Entry the host OS creates on the volume.
    #[serde(default = "default_system_volume")]
    pub system_volume: String,
}

impl StorageConfig {
    /// Names excluded from recording and playback.
    pub fn reserved_names(&self) -> ReservedNames {
        ReservedNames {
            greeting: self.greeting.clone(),
            index_files: self.index_files.clone(),
            system_volume: self.system_volume.clone(),
        }
    }
}
