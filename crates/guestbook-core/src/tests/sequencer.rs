use crate::{
    Catalog, HookSwitch, MIN_SETTLE, Mode, PlaybackSequencer, ReservedNames, Timing,
    tests::support::{FakeAudio, ManualClock, ScriptedHook, ms},
};

use std::time::Duration;

struct Rig {
    input: ScriptedHook,
    hook: HookSwitch<ScriptedHook, ManualClock>,
    audio: FakeAudio,
    sequencer: PlaybackSequencer,
    timing: Timing,
}

/// Sequencer over `files`, each playing for `length`, handset lifted.
fn rig(files: &[&str], length: Duration) -> Rig {
    let clock = ManualClock::new();
    let input = ScriptedHook::new(&clock, true);
    let hook = HookSwitch::new(input.clone(), clock.clone(), MIN_SETTLE);
    let mut audio = FakeAudio::new(&clock);
    for file in files {
        audio = audio.with_file(file, length);
    }
    let listing = files.iter().map(|name| name.to_string());
    Rig {
        input,
        hook,
        audio,
        sequencer: PlaybackSequencer::new(Catalog::from_names(listing, &ReservedNames::default())),
        timing: Timing::default(),
    }
}

impl Rig {
    fn run(&mut self) -> Mode {
        let mut mode = Mode::Playing;
        self.sequencer
            .run(&mut mode, &mut self.hook, &mut self.audio, &self.timing);
        mode
    }
}

/// WHAT: Replacing the handset mid-message stops playback at once
/// WHY: The device must go quiet as soon as the handset is put down
#[test]
fn given_replace_during_playback_when_running_then_stopped_and_cursor_advanced() {
    // Given: Three 1s messages; each entry takes 1.5s of pauses and cue
    let mut rig = rig(&["00000.wav", "00001.wav", "00002.wav"], ms(1000));
    rig.input.replace_at(ms(4500));

    // When: Running the sequencer
    let mode = rig.run();

    // Then: Second message cut short, cursor on the third
    assert_eq!(mode, Mode::Ready);
    assert_eq!(rig.audio.played, vec!["00000.wav", "00001.wav"]);
    assert_eq!(rig.audio.playback_stops, 1);
    assert_eq!(rig.sequencer.catalog().cursor(), 2);
    assert!(!rig.sequencer.in_progress());
}

/// WHAT: Every entry is preceded by a cue tone that is switched off again
/// WHY: Listeners hear where one message ends and the next begins
#[test]
fn given_catalog_when_playing_then_cue_before_each_entry() {
    // Given: Two short messages and a replace during the third entry
    let mut rig = rig(&["00000.wav", "00001.wav"], ms(100));
    rig.input.replace_at(ms(3200 + 600));

    // When: Running the sequencer
    rig.run();

    // Then: Three cues started (the third entry was interrupted after its
    // cue), and no tone is left sounding
    assert_eq!(rig.audio.tones_started, vec![440.0, 440.0, 440.0]);
    assert_eq!(rig.audio.tone, None);
    assert_eq!(rig.audio.played, vec!["00000.wav", "00001.wav"]);
}

/// WHAT: A single-entry catalog repeats the same file
/// WHY: Wraparound with one entry must not skip or stall
#[test]
fn given_single_entry_when_looping_then_same_file_repeats() {
    // Given: One 100ms message; each entry takes 1.6s
    let mut rig = rig(&["00007.wav"], ms(100));
    rig.input.replace_at(ms(2 * 1600 + 1510));

    // When: Running the sequencer
    rig.run();

    // Then: Played three times, interrupted on the third, cursor home
    assert_eq!(rig.audio.played, vec!["00007.wav"; 3]);
    assert_eq!(rig.audio.playback_stops, 1);
    assert_eq!(rig.sequencer.catalog().cursor(), 0);
}

/// WHAT: Multiple entries wrap back to the first
/// WHY: Playback loops through the whole catalog indefinitely
#[test]
fn given_two_entries_when_looping_past_end_then_wraps_to_first() {
    // Given: Two 100ms messages, replaced during the fifth entry
    let mut rig = rig(&["00000.wav", "00001.wav"], ms(100));
    rig.input.replace_at(ms(4 * 1600 + 1510));

    // When: Running the sequencer
    rig.run();

    // Then: a, b, a, b, a and the cursor on b
    assert_eq!(
        rig.audio.played,
        vec!["00000.wav", "00001.wav", "00000.wav", "00001.wav", "00000.wav"]
    );
    assert_eq!(rig.sequencer.catalog().cursor(), 1);
}

/// WHAT: An empty catalog returns to Ready immediately
/// WHY: There is nothing to loop over and the cursor has no valid index
#[test]
fn given_empty_catalog_when_running_then_ready_without_audio() {
    // Given: No recordings
    let mut rig = rig(&[], ms(100));

    // When: Running the sequencer
    let mode = rig.run();

    // Then: Back to Ready with no sound at all
    assert_eq!(mode, Mode::Ready);
    assert!(rig.audio.played.is_empty());
    assert!(rig.audio.tones_started.is_empty());
    assert_eq!(rig.sequencer.catalog().cursor(), 0);
}

/// WHAT: Interrupting a pause still moves past the entry
/// WHY: The next lift resumes with the following message, not the same one
#[test]
fn given_replace_during_lead_in_when_lifted_again_then_next_entry_plays() {
    // Given: Three messages; handset put down during the first lead-in
    let mut rig = rig(&["00000.wav", "00001.wav", "00002.wav"], ms(100));
    rig.input.replace_at(ms(100));

    // When: Running, then lifting again and running until replaced
    let first = rig.run();
    rig.input.lift_at(ms(300));
    rig.input.replace_at(ms(3000));
    let second = rig.run();

    // Then: Nothing played the first time; the second session starts at
    // the entry after the interrupted one
    assert_eq!(first, Mode::Ready);
    assert_eq!(second, Mode::Ready);
    assert_eq!(rig.audio.played.first().map(String::as_str), Some("00001.wav"));
}

/// WHAT: An unplayable entry is skipped and the loop continues
/// WHY: One damaged file must not stop playback of the rest
#[test]
fn given_unplayable_entry_when_running_then_skipped() {
    // Given: Three catalog entries but the middle one cannot be played
    let clock = ManualClock::new();
    let input = ScriptedHook::new(&clock, true);
    let mut hook = HookSwitch::new(input.clone(), clock.clone(), MIN_SETTLE);
    let mut audio = FakeAudio::new(&clock)
        .with_file("00000.wav", ms(100))
        .with_file("00002.wav", ms(100));
    let listing = ["00000.wav", "00001.wav", "00002.wav"].map(String::from);
    let mut sequencer =
        PlaybackSequencer::new(Catalog::from_names(listing, &ReservedNames::default()));
    input.replace_at(ms(1600 + 1500 + 1510));

    // When: Running
    let mut mode = Mode::Playing;
    sequencer.run(&mut mode, &mut hook, &mut audio, &Timing::default());

    // Then: The first and third were played
    assert_eq!(audio.played, vec!["00000.wav", "00002.wav"]);
    assert_eq!(mode, Mode::Ready);
}
