use crate::{device::OperatingMode, recorder::DEFAULT_BATCH_BLOCKS, sensor::MIN_SETTLE};

use std::time::Duration;

/// File name of the greeting played before recording.
pub const DEFAULT_GREETING: &str = "greeting.wav";
/// Index artifact kept next to the recordings.
pub const DEFAULT_INDEX_FILE: &str = "index.dat";
/// Entry the host OS creates on the volume.
pub const DEFAULT_SYSTEM_VOLUME: &str = "System Volume Information";

/// Names on the volume that are never recordings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedNames {
    /// Greeting played in prompting mode.
    pub greeting: String,
    /// Index artifacts.
    pub index_files: Vec<String>,
    /// Host system entry.
    pub system_volume: String,
}

impl ReservedNames {
    /// Whether `name` is one of the reserved entries.
    pub fn is_reserved(&self, name: &str) -> bool {
        name == self.greeting
            || name == self.system_volume
            || self.index_files.iter().any(|index| index == name)
    }
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            index_files: vec![DEFAULT_INDEX_FILE.to_string()],
            system_volume: DEFAULT_SYSTEM_VOLUME.to_string(),
        }
    }
}

/// Pacing delays and tones. Every delay here runs through the
/// interruptible wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Debounce settle time of the hook switch.
    pub settle: Duration,
    /// Pause after lifting before the greeting starts.
    pub prompt_delay: Duration,
    /// Length of the tone after the greeting.
    pub prompt_tone: Duration,
    /// Frequency of the tone after the greeting.
    pub prompt_tone_hz: f32,
    /// Silence before the cue of each played message.
    pub lead_in: Duration,
    /// Length of the cue before each played message.
    pub cue: Duration,
    /// Frequency of the cue before each played message.
    pub cue_hz: f32,
    /// Silence between the cue and the message.
    pub lead_out: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: MIN_SETTLE,
            prompt_delay: Duration::from_millis(1000),
            prompt_tone: Duration::from_millis(1250),
            prompt_tone_hz: 440.0,
            lead_in: Duration::from_millis(500),
            cue: Duration::from_millis(750),
            cue_hz: 440.0,
            lead_out: Duration::from_millis(250),
        }
    }
}

/// Everything the state machine needs to know about its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSettings {
    /// Flow started by lifting the handset.
    pub operating_mode: OperatingMode,
    /// Names excluded from recording and playback.
    pub names: ReservedNames,
    /// Pacing delays.
    pub timing: Timing,
    /// Capture blocks per storage write.
    pub batch_blocks: usize,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            operating_mode: OperatingMode::default(),
            names: ReservedNames::default(),
            timing: Timing::default(),
            batch_blocks: DEFAULT_BATCH_BLOCKS,
        }
    }
}
