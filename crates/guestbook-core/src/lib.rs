//! Guestbook Core Library
//!
//! Control core of a telephone audio guestbook: a debounced handset switch
//! drives a cooperative state machine that plays a greeting and records a
//! message to a WAV file, or loops through the stored messages.
//!
//! # Example
//!
//! ```no_run
//! use guestbook_core::{
//!     AudioSettings, CoreResult, CpalAudio, Device, DeviceSettings, DirStorage, GpioValueInput,
//!     StorageWatch, SystemClock, TransferTask, DEFAULT_QUEUE_BLOCKS,
//! };
//!
//! use std::time::Duration;
//!
//! fn main() -> CoreResult<()> {
//!     let storage = DirStorage::new("/media/guestbook");
//!     let audio = CpalAudio::new(
//!         AudioSettings {
//!             volume: 0.6,
//!             beep_volume: 0.1,
//!             queue_blocks: DEFAULT_QUEUE_BLOCKS,
//!         },
//!         storage.clone(),
//!     )?;
//!     let input = GpioValueInput::new("/sys/class/gpio/gpio17/value", 1);
//!     let clock = SystemClock::new(Duration::from_millis(1));
//!
//!     let mut watch = StorageWatch::new(storage.clone(), clock.clone(), Duration::from_secs(1));
//!     let mut device = Device::new(DeviceSettings::default(), storage, audio, input, clock);
//!     device.boot()?;
//!
//!     loop {
//!         device.step(&mut watch);
//!         watch.service();
//!     }
//! }
//! ```

mod audio;
mod clock;
mod device;
mod error;
mod playback;
mod recorder;
mod sensor;
mod storage;
mod transfer;
mod wav;

pub use {
    audio::{
        AudioBlock, AudioPipeline, AudioSettings, BLOCK_BYTES, BLOCK_SAMPLES, BlockAssembler,
        CpalAudio, DEFAULT_QUEUE_BLOCKS, Mixer, SampleQueue, downmix, to_pcm16,
    },
    clock::{Clock, SystemClock},
    device::{
        DEFAULT_GREETING, DEFAULT_INDEX_FILE, DEFAULT_SYSTEM_VOLUME, Device, DeviceSettings, Mode,
        OperatingMode, ReservedNames, Timing,
    },
    error::{CoreError, Result as CoreResult},
    playback::{Catalog, PlaybackSequencer},
    recorder::{
        DEFAULT_BATCH_BLOCKS, MAX_SEQUENCE, RecordingSession, RecordingSummary,
        StreamingRecorder, first_unused, payload_len, recording_name,
    },
    sensor::{Debouncer, Edge, GpioValueInput, HookInput, HookSwitch, MIN_SETTLE, WaitOutcome},
    storage::{DirStorage, Storage},
    transfer::{StorageWatch, TransferTask},
    wav::{BITS_PER_SAMPLE, CHANNELS, HEADER_LEN, SAMPLE_RATE, WavHeader, read_samples},
};

#[cfg(test)]
mod tests;
