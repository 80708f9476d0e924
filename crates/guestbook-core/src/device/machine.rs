//! Device state machine.
//!
//! [`Device::step`] is the single entry point of the scheduling loop. It polls
//! the handset once, then runs one unit of work for the current [`Mode`].
//! Every delay inside a unit goes through the interruptible waits of
//! [`HookSwitch`], so the handset is never missed.

use crate::{
    CoreError, CoreResult,
    audio::AudioPipeline,
    clock::Clock,
    device::{DeviceSettings, Mode, OperatingMode},
    playback::{Catalog, PlaybackSequencer},
    recorder::{RecordingSummary, StreamingRecorder},
    sensor::{Edge, HookInput, HookSwitch},
    storage::Storage,
    transfer::TransferTask,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// The audio guestbook: current mode plus everything it orchestrates.
pub struct Device<S: Storage, A, H, C> {
    settings: DeviceSettings,
    mode: Mode,
    hook: HookSwitch<H, C>,
    audio: A,
    storage: S,
    recorder: StreamingRecorder<S::Writer>,
    sequencer: PlaybackSequencer,
}

impl<S, A, H, C> Device<S, A, H, C>
where
    S: Storage,
    A: AudioPipeline,
    H: HookInput,
    C: Clock,
{
    /// Assemble a device in [`Mode::Initializing`]. Call [`Device::boot`]
    /// before stepping it.
    pub fn new(settings: DeviceSettings, storage: S, audio: A, input: H, clock: C) -> Self {
        let hook = HookSwitch::new(input, clock, settings.timing.settle);
        let recorder = StreamingRecorder::new(settings.batch_blocks);
        Self {
            settings,
            mode: Mode::Initializing,
            hook,
            audio,
            storage,
            recorder,
            sequencer: PlaybackSequencer::default(),
        }
    }

    /// Check storage and, in playback configuration, build the catalog.
    ///
    /// The catalog is never rebuilt afterwards: recordings added later are
    /// only played after the next boot.
    ///
    /// # Errors
    ///
    /// Returns error if storage is unavailable or cannot be listed. The
    /// device stays in [`Mode::Initializing`] and must not be stepped.
    #[track_caller]
    #[instrument(skip(self), fields(operating_mode = %self.settings.operating_mode))]
    pub fn boot(&mut self) -> CoreResult<()> {
        if !self.storage.is_available() {
            return Err(CoreError::StorageUnavailable {
                reason: "volume not present at boot".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.settings.operating_mode == OperatingMode::Playback {
            let catalog = Catalog::scan(&self.storage, &self.settings.names)?;
            self.sequencer = PlaybackSequencer::new(catalog);
        }

        self.set_mode(Mode::Ready);
        info!("Device ready");
        Ok(())
    }

    /// Run one scheduling-loop iteration.
    pub fn step<T: TransferTask>(&mut self, transfer: &mut T) {
        let edge = self.hook.poll();

        match self.mode {
            Mode::Initializing => debug!("Step before boot ignored"),
            Mode::Ready => self.on_ready(edge),
            Mode::Prompting => self.on_prompting(edge, transfer),
            Mode::Recording => self.on_recording(edge, transfer),
            Mode::Playing => self.on_playing(),
        }
    }

    /// Finalize any open recording and silence the outputs.
    ///
    /// Returns the summary of the recording that was closed, if any.
    #[instrument(skip(self, transfer))]
    pub fn shutdown<T: TransferTask>(&mut self, transfer: &mut T) -> Option<RecordingSummary> {
        self.audio.stop_tone();
        self.audio.stop_playback();
        let summary = if self.recorder.is_recording() {
            self.finish_recording(transfer)
        } else {
            None
        };
        info!(mode = %self.mode, "Device shut down");
        summary
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Configuration the device was built with.
    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Debounced handset.
    pub fn hook(&self) -> &HookSwitch<H, C> {
        &self.hook
    }

    /// Audio pipeline.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Storage volume.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Recorder and its open session, if any.
    pub fn recorder(&self) -> &StreamingRecorder<S::Writer> {
        &self.recorder
    }

    /// Playback sequencer and its catalog.
    pub fn sequencer(&self) -> &PlaybackSequencer {
        &self.sequencer
    }

    #[cfg(test)]
    pub(crate) fn settings_mut(&mut self) -> &mut DeviceSettings {
        &mut self.settings
    }

    #[cfg(test)]
    pub(crate) fn force_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn on_ready(&mut self, edge: Edge) {
        if edge != Edge::Lifted {
            return;
        }

        match self.settings.operating_mode {
            OperatingMode::Record => self.set_mode(Mode::Prompting),
            OperatingMode::Playback => {
                self.set_mode(Mode::Playing);
                self.on_playing();
            }
        }
    }

    /// Pause, greeting, tone, then open the recording. Putting the handset
    /// down anywhere along the way returns to Ready without recording.
    fn on_prompting<T: TransferTask>(&mut self, edge: Edge, transfer: &mut T) {
        if !self.permitted(Mode::Prompting) {
            return;
        }
        if edge == Edge::Replaced {
            self.abandon_prompt("before greeting");
            return;
        }

        let timing = self.settings.timing;

        if self
            .hook
            .wait(timing.prompt_delay, Edge::Replaced)
            .interrupted()
        {
            self.abandon_prompt("before greeting");
            return;
        }

        match self.audio.play_file(&self.settings.names.greeting) {
            Ok(()) => {
                let audio = &self.audio;
                let outcome = self
                    .hook
                    .wait_until(Edge::Replaced, || !audio.is_playing());
                if outcome.interrupted() {
                    self.audio.stop_playback();
                    self.abandon_prompt("during greeting");
                    return;
                }
            }
            Err(e) => warn!(
                file = %self.settings.names.greeting,
                error = %e,
                "Greeting unavailable, skipping to tone"
            ),
        }

        self.audio.start_tone(timing.prompt_tone_hz);
        let tone = self.hook.wait(timing.prompt_tone, Edge::Replaced);
        self.audio.stop_tone();
        if tone.interrupted() {
            self.abandon_prompt("during tone");
            return;
        }

        let from = self.mode;
        match self
            .recorder
            .start(&mut self.mode, &self.storage, &self.audio, transfer)
        {
            Ok(()) => info!(%from, to = %self.mode, "Mode changed"),
            Err(e) => {
                error!(error = %e, "Could not start recording");
                self.set_mode(Mode::Ready);
            }
        }
    }

    fn on_recording<T: TransferTask>(&mut self, edge: Edge, transfer: &mut T) {
        if !self.permitted(Mode::Recording) {
            if self.recorder.is_recording() {
                self.finish_recording(transfer);
            }
            return;
        }
        if !self.recorder.is_recording() {
            warn!("Recording mode without an open session");
            self.set_mode(Mode::Ready);
            return;
        }
        if edge == Edge::Replaced {
            self.finish_recording(transfer);
            return;
        }

        if let Err(e) = self.recorder.drain_step(&self.audio) {
            error!(error = %e, "Write failed, ending recording");
            self.finish_recording(transfer);
        }
    }

    fn on_playing(&mut self) {
        if !self.permitted(Mode::Playing) {
            return;
        }
        self.sequencer.run(
            &mut self.mode,
            &mut self.hook,
            &mut self.audio,
            &self.settings.timing,
        );
    }

    fn finish_recording<T: TransferTask>(&mut self, transfer: &mut T) -> Option<RecordingSummary> {
        let from = self.mode;
        let result = self
            .recorder
            .stop(&mut self.mode, &self.storage, &self.audio, transfer);
        info!(%from, to = %self.mode, "Mode changed");

        match result {
            Ok(summary) => Some(summary),
            Err(e) => {
                error!(error = %e, "Failed to finalize recording");
                None
            }
        }
    }

    fn abandon_prompt(&mut self, stage: &str) {
        info!(stage, "Handset replaced while prompting");
        self.set_mode(Mode::Ready);
    }

    /// Fall back to Ready when the operating mode forbids `mode`.
    fn permitted(&mut self, mode: Mode) -> bool {
        if self.settings.operating_mode.permits(mode) {
            return true;
        }
        warn!(
            %mode,
            operating_mode = %self.settings.operating_mode,
            "Mode not allowed in this configuration, returning to Ready"
        );
        self.set_mode(Mode::Ready);
        false
    }

    fn set_mode(&mut self, to: Mode) {
        if self.mode != to {
            info!(from = %self.mode, %to, "Mode changed");
            self.mode = to;
        }
    }
}
