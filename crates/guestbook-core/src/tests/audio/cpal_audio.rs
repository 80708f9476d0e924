use crate::{
    AudioPipeline, AudioSettings, CpalAudio, DEFAULT_QUEUE_BLOCKS, DirStorage, WavHeader,
};

use std::{fs, thread, time::Duration};

use tempfile::TempDir;

fn settings() -> AudioSettings {
    AudioSettings {
        volume: 0.6,
        beep_volume: 0.1,
        queue_blocks: DEFAULT_QUEUE_BLOCKS,
    }
}

/// WHAT: A missing file fails playback without touching the mixer
/// WHY: The sequencer skips unreadable entries and must see an error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_playing_then_error_and_idle() {
    // Given: Real audio devices over an empty volume
    let dir = TempDir::new().unwrap();
    let mut audio = CpalAudio::new(settings(), DirStorage::new(dir.path())).unwrap();

    // When: Playing a file that is not there
    let result = audio.play_file("00000.wav");

    // Then: Error, nothing playing
    assert!(result.is_err());
    assert!(!audio.is_playing());
}

/// WHAT: A short recording plays to completion on the output device
/// WHY: Playback end is what releases the sequencer's wait
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_short_file_when_playing_then_playback_ends() {
    // Given: A 0.1 s silent recording
    let dir = TempDir::new().unwrap();
    let payload = vec![0u8; 8_820];
    let mut bytes = WavHeader::for_payload(payload.len() as u32).encode().to_vec();
    bytes.extend_from_slice(&payload);
    fs::write(dir.path().join("00000.wav"), bytes).unwrap();
    let mut audio = CpalAudio::new(settings(), DirStorage::new(dir.path())).unwrap();

    // When: Playing it and waiting well past its length
    audio.play_file("00000.wav").unwrap();
    assert!(audio.is_playing());
    thread::sleep(Duration::from_millis(500));

    // Then: Playback has finished on its own
    assert!(!audio.is_playing());
}

/// WHAT: Capture only fills the queue while it is active
/// WHY: Blocks outside a recording session would be written into the next file
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_inactive_queue_when_input_runs_then_no_blocks_queued() {
    // Given: Real devices with capture left inactive
    let dir = TempDir::new().unwrap();
    let audio = CpalAudio::new(settings(), DirStorage::new(dir.path())).unwrap();

    // When: The input stream runs for a while
    thread::sleep(Duration::from_millis(200));

    // Then: Nothing queued
    assert_eq!(audio.capture_queue().available(), 0);
}
