use crate::{
    audio::AudioPipeline,
    clock::Clock,
    device::{Mode, Timing},
    playback::Catalog,
    sensor::{Edge, HookInput, HookSwitch, WaitOutcome},
};

use tracing::{debug, info, instrument, warn};

/// Plays the catalog in a loop for as long as the handset stays lifted.
#[derive(Debug, Default)]
pub struct PlaybackSequencer {
    catalog: Catalog,
    in_progress: bool,
}

impl PlaybackSequencer {
    /// Take ownership of the catalog built at boot.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            in_progress: false,
        }
    }

    /// Catalog and its cursor.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether [`PlaybackSequencer::run`] is executing.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Play entries while `mode` stays [`Mode::Playing`].
    ///
    /// Each entry gets a lead-in pause, a cue tone, a lead-out pause and
    /// then the file itself. Putting the handset down at any point stops
    /// playback, sets `mode` to [`Mode::Ready`] and returns; the cursor
    /// still moves past the interrupted entry. An empty catalog returns to
    /// Ready at once.
    #[instrument(skip(self, mode, hook, audio, timing))]
    pub fn run<H, C, A>(
        &mut self,
        mode: &mut Mode,
        hook: &mut HookSwitch<H, C>,
        audio: &mut A,
        timing: &Timing,
    ) where
        H: HookInput,
        C: Clock,
        A: AudioPipeline,
    {
        if self.in_progress {
            warn!("Playback already in progress");
            return;
        }
        if self.catalog.is_empty() {
            info!("No recordings to play");
            *mode = Mode::Ready;
            return;
        }

        self.in_progress = true;

        while *mode == Mode::Playing {
            let Some(name) = self.catalog.current().map(str::to_owned) else {
                break;
            };

            let outcome = play_entry(&name, hook, audio, timing);
            self.catalog.advance();

            if outcome.interrupted() {
                info!(file = %name, next = self.catalog.cursor(), "Playback interrupted");
                *mode = Mode::Ready;
            }
        }

        self.in_progress = false;
    }
}

fn play_entry<H, C, A>(
    name: &str,
    hook: &mut HookSwitch<H, C>,
    audio: &mut A,
    timing: &Timing,
) -> WaitOutcome
where
    H: HookInput,
    C: Clock,
    A: AudioPipeline,
{
    if hook.wait(timing.lead_in, Edge::Replaced).interrupted() {
        return WaitOutcome::Interrupted;
    }

    audio.start_tone(timing.cue_hz);
    let cue = hook.wait(timing.cue, Edge::Replaced);
    audio.stop_tone();
    if cue.interrupted() {
        return WaitOutcome::Interrupted;
    }

    if hook.wait(timing.lead_out, Edge::Replaced).interrupted() {
        return WaitOutcome::Interrupted;
    }

    if let Err(e) = audio.play_file(name) {
        warn!(file = name, error = %e, "Skipping unplayable recording");
        return WaitOutcome::Completed;
    }
    debug!(file = name, "Playing recording");

    let outcome = hook.wait_until(Edge::Replaced, || !audio.is_playing());
    if outcome.interrupted() {
        audio.stop_playback();
    }
    outcome
}
