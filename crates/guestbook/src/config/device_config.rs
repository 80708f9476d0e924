use guestbook_core::OperatingMode;
use serde::{Deserialize, Serialize};

/// Which flow the handset starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// `record` takes messages, `playback` plays them back.
    #[serde(default)]
    pub operating_mode: OperatingMode,
}
