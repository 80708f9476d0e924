#[allow(clippy::module_inception)]
mod recorder;
mod sequence;

pub use {
    recorder::{
        DEFAULT_BATCH_BLOCKS, RecordingSession, RecordingSummary, StreamingRecorder, payload_len,
    },
    sequence::{MAX_SEQUENCE, first_unused, recording_name},
};
