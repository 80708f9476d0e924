use crate::{BLOCK_SAMPLES, BlockAssembler, downmix, to_pcm16};

/// WHAT: Samples are grouped into whole blocks
/// WHY: The queue only carries full 128-sample blocks
#[test]
#[allow(clippy::unwrap_used)]
fn given_samples_when_block_fills_then_block_emitted_in_order() {
    // Given: An empty assembler
    let mut assembler = BlockAssembler::new();

    // When: Pushing one block and three extra samples
    let mut blocks = Vec::new();
    for i in 0..(BLOCK_SAMPLES + 3) {
        if let Some(block) = assembler.push(i as i16) {
            blocks.push(block);
        }
    }

    // Then: One full block came out and three samples are pending
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0][0], 0);
    assert_eq!(blocks[0][BLOCK_SAMPLES - 1], (BLOCK_SAMPLES - 1) as i16);
    assert_eq!(assembler.pending(), 3);
}

/// WHAT: reset() drops a partial block
/// WHY: A new recording must not start with the tail of the previous one
#[test]
fn given_partial_block_when_reset_then_nothing_pending() {
    // Given: An assembler holding a partial block
    let mut assembler = BlockAssembler::default();
    for _ in 0..50 {
        assembler.push(1);
    }

    // When: Resetting
    assembler.reset();

    // Then: Nothing is pending
    assert_eq!(assembler.pending(), 0);
}

/// WHAT: Frames are averaged to mono and clipped to 16 bits
/// WHY: Files are mono 16-bit whatever the input device delivers
#[test]
fn given_frames_when_converting_then_mono_pcm16() {
    // Given/When: A stereo frame, an empty frame and out-of-range input
    let mixed = downmix(&[0.5, -0.25]);
    let silent = downmix(&[]);

    // Then: Mono average and clipped PCM
    assert!((mixed - 0.125).abs() < f32::EPSILON);
    assert_eq!(silent, 0.0);
    assert_eq!(to_pcm16(1.0), i16::MAX);
    assert_eq!(to_pcm16(2.0), i16::MAX);
    assert_eq!(to_pcm16(-3.0), -i16::MAX);
    assert_eq!(to_pcm16(0.0), 0);
}
