use crate::config::{default_beep_volume, default_queue_blocks, default_volume};

use guestbook_core::AudioSettings;
use serde::{Deserialize, Serialize};

/// Output levels and capture buffering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Gain for message and greeting playback (0.0 to 1.0).
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Gain for the prompt and cue tones (0.0 to 1.0).
    #[serde(default = "default_beep_volume")]
    pub beep_volume: f32,
    /// Capture queue depth in 128-sample blocks.
    #[serde(default = "default_queue_blocks")]
    pub queue_blocks: usize,
}

impl AudioConfig {
    /// Settings for the cpal pipeline.
    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            volume: self.volume,
            beep_volume: self.beep_volume,
            queue_blocks: self.queue_blocks,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            beep_volume: default_beep_volume(),
            queue_blocks: default_queue_blocks(),
        }
    }
}
