mod header;
mod samples;

pub use {
    header::{BITS_PER_SAMPLE, CHANNELS, HEADER_LEN, SAMPLE_RATE, WavHeader},
    samples::read_samples,
};
