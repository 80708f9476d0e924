use crate::config::{
    default_batch_blocks, default_cue_ms, default_lead_in_ms, default_lead_out_ms,
    default_prompt_delay_ms, default_prompt_tone_ms, default_tone_hz,
};

use std::time::Duration;

use guestbook_core::Timing;
use serde::{Deserialize, Serialize};

/// Pacing of the prompt and playback flows, and the recorder batch size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause between lifting the handset and the greeting.
    #[serde(default = "default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,
    /// Tone after the greeting.
    #[serde(default = "default_prompt_tone_ms")]
    pub prompt_tone_ms: u64,
    #[serde(default = "default_tone_hz")]
    pub prompt_tone_hz: f32,
    /// Silence before each played message's cue.
    #[serde(default = "default_lead_in_ms")]
    pub lead_in_ms: u64,
    /// Cue tone before each played message.
    #[serde(default = "default_cue_ms")]
    pub cue_ms: u64,
    #[serde(default = "default_tone_hz")]
    pub cue_hz: f32,
    /// Silence between the cue and the message.
    #[serde(default = "default_lead_out_ms")]
    pub lead_out_ms: u64,
    /// Capture blocks per storage write (2 blocks = 512 bytes).
    #[serde(default = "default_batch_blocks")]
    pub batch_blocks: usize,
}

impl TimingConfig {
    /// Core timing with the debounce settle time filled in.
    pub fn timing(&self, settle: Duration) -> Timing {
        Timing {
            settle,
            prompt_delay: Duration::from_millis(self.prompt_delay_ms),
            prompt_tone: Duration::from_millis(self.prompt_tone_ms),
            prompt_tone_hz: self.prompt_tone_hz,
            lead_in: Duration::from_millis(self.lead_in_ms),
            cue: Duration::from_millis(self.cue_ms),
            cue_hz: self.cue_hz,
            lead_out: Duration::from_millis(self.lead_out_ms),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            prompt_delay_ms: default_prompt_delay_ms(),
            prompt_tone_ms: default_prompt_tone_ms(),
            prompt_tone_hz: default_tone_hz(),
            lead_in_ms: default_lead_in_ms(),
            cue_ms: default_cue_ms(),
            cue_hz: default_tone_hz(),
            lead_out_ms: default_lead_out_ms(),
            batch_blocks: default_batch_blocks(),
        }
    }
}
