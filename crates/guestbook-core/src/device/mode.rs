use std::fmt;

use serde::{Deserialize, Serialize};

/// What the device is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Power-up, before storage has been checked.
    #[default]
    Initializing,
    /// Handset on the hook, waiting to be lifted.
    Ready,
    /// Handset lifted, greeting and tone in progress.
    Prompting,
    /// Capturing a message to storage.
    Recording,
    /// Looping through the stored messages.
    Playing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Initializing => write!(f, "Initializing"),
            Mode::Ready => write!(f, "Ready"),
            Mode::Prompting => write!(f, "Prompting"),
            Mode::Recording => write!(f, "Recording"),
            Mode::Playing => write!(f, "Playing"),
        }
    }
}

/// Which flow lifting the handset starts. Fixed for the lifetime of the
/// device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Greeting, tone, then record a message.
    #[default]
    Record,
    /// Play back every stored message in order.
    Playback,
}

impl OperatingMode {
    /// Whether a mode may be entered under this configuration.
    pub fn permits(self, mode: Mode) -> bool {
        match mode {
            Mode::Prompting | Mode::Recording => self == OperatingMode::Record,
            Mode::Playing => self == OperatingMode::Playback,
            Mode::Initializing | Mode::Ready => true,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Record => write!(f, "record"),
            OperatingMode::Playback => write!(f, "playback"),
        }
    }
}
