use crate::audio::{AudioBlock, BLOCK_SAMPLES};

/// Collects single samples from the capture callback into whole blocks.
#[derive(Debug, Clone)]
pub struct BlockAssembler {
    block: AudioBlock,
    filled: usize,
}

impl BlockAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self {
            block: [0; BLOCK_SAMPLES],
            filled: 0,
        }
    }

    /// Append one sample, returning the block once it is full.
    pub fn push(&mut self, sample: i16) -> Option<AudioBlock> {
        self.block[self.filled] = sample;
        self.filled += 1;
        if self.filled == BLOCK_SAMPLES {
            self.filled = 0;
            Some(self.block)
        } else {
            None
        }
    }

    /// Drop a partially filled block.
    pub fn reset(&mut self) {
        self.filled = 0;
    }

    /// Samples in the block under construction.
    pub fn pending(&self) -> usize {
        self.filled
    }
}

impl Default for BlockAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Average one interleaved frame down to a single channel.
pub fn downmix(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    frame.iter().sum::<f32>() / frame.len() as f32
}

/// Convert a `-1.0..=1.0` sample to 16-bit PCM, clipping out-of-range input.
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
