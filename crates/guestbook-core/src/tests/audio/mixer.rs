use crate::Mixer;

/// WHAT: A silent mixer renders zeros
/// WHY: Idle output must not hiss or hum
#[test]
fn given_idle_mixer_when_rendering_then_silence() {
    // Given: A mixer with nothing active
    let mut mixer = Mixer::new(0.6, 0.1);

    // When: Rendering a few samples
    let samples: Vec<f32> = (0..16).map(|_| mixer.next_sample()).collect();

    // Then: All silent
    assert!(samples.iter().all(|s| *s == 0.0));
}

/// WHAT: The tone is scaled by the beep volume
/// WHY: Beeps must stay well below the message level
#[test]
fn given_tone_when_rendering_then_peak_bounded_by_beep_volume() {
    // Given: A 440Hz tone at beep volume 0.1
    let mut mixer = Mixer::new(0.6, 0.1);
    mixer.start_tone(440.0);

    // When: Rendering 1000 samples
    let peak = (0..1000)
        .map(|_| mixer.next_sample().abs())
        .fold(0.0f32, f32::max);

    // Then: The peak approaches but never exceeds 0.1
    assert!(mixer.tone_active());
    assert!(peak > 0.09);
    assert!(peak <= 0.1 + f32::EPSILON);
}

/// WHAT: Playback ends by itself after the last sample
/// WHY: The control loop follows is_playing() to know when a file is done
#[test]
fn given_short_playback_when_rendered_to_end_then_not_playing() {
    // Given: Three samples queued at full volume
    let mut mixer = Mixer::new(1.0, 0.0);
    mixer.start_playback(vec![i16::MAX, 0, -i16::MAX]);

    // When: Rendering them
    let rendered: Vec<f32> = (0..3).map(|_| mixer.next_sample()).collect();

    // Then: The samples come out scaled and playback is over
    assert!((rendered[0] - 1.0).abs() < 1e-6);
    assert_eq!(rendered[1], 0.0);
    assert!((rendered[2] + 1.0).abs() < 1e-6);
    assert!(!mixer.is_playing());
}

/// WHAT: Empty files do not start playback
/// WHY: A zero-length recording must not leave is_playing() stuck
#[test]
fn given_empty_samples_when_starting_playback_then_not_playing() {
    // Given: A mixer
    let mut mixer = Mixer::new(0.6, 0.1);

    // When: Starting playback of nothing
    mixer.start_playback(Vec::new());

    // Then: Nothing plays
    assert!(!mixer.is_playing());
}
