use crate::{CoreResult, audio::SampleQueue};

/// Audio capture, tone and file playback hardware seen by the control core.
pub trait AudioPipeline {
    /// Start a continuous sine tone at `frequency_hz`.
    fn start_tone(&mut self, frequency_hz: f32);

    /// Silence the tone generator.
    fn stop_tone(&mut self);

    /// Queue fed by the capture side while it is enabled.
    fn capture_queue(&self) -> &SampleQueue;

    /// Start playing the recording stored as `name`.
    fn play_file(&mut self, name: &str) -> CoreResult<()>;

    /// Stop file playback immediately.
    fn stop_playback(&mut self);

    /// Whether file playback is still running.
    fn is_playing(&self) -> bool;
}
