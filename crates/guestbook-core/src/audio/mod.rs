mod assembler;
mod cpal_audio;
mod mixer;
mod pipeline;
pub(crate) mod queue;

pub use {
    assembler::{BlockAssembler, downmix, to_pcm16},
    cpal_audio::{AudioSettings, CpalAudio},
    mixer::Mixer,
    pipeline::AudioPipeline,
    queue::{AudioBlock, BLOCK_BYTES, BLOCK_SAMPLES, DEFAULT_QUEUE_BLOCKS, SampleQueue},
};
