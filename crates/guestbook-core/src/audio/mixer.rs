use crate::wav::SAMPLE_RATE;

use std::f32::consts::TAU;

/// Output mix of the tone generator and file playback, one sample at a time.
///
/// Lives behind a mutex shared with the output stream callback; the control
/// loop only flips its state.
#[derive(Debug, Clone)]
pub struct Mixer {
    volume: f32,
    beep_volume: f32,
    tone: Option<Tone>,
    playback: Option<Playback>,
}

#[derive(Debug, Clone)]
struct Tone {
    phase: f32,
    step: f32,
}

#[derive(Debug, Clone)]
struct Playback {
    samples: Vec<i16>,
    position: usize,
}

impl Mixer {
    /// Create a silent mixer. Both gains are clamped to `0.0..=1.0`.
    pub fn new(volume: f32, beep_volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            beep_volume: beep_volume.clamp(0.0, 1.0),
            tone: None,
            playback: None,
        }
    }

    /// Start (or retune) the sine tone.
    pub fn start_tone(&mut self, frequency_hz: f32) {
        let step = TAU * frequency_hz / SAMPLE_RATE as f32;
        match self.tone.as_mut() {
            Some(tone) => tone.step = step,
            None => self.tone = Some(Tone { phase: 0.0, step }),
        }
    }

    /// Silence the tone.
    pub fn stop_tone(&mut self) {
        self.tone = None;
    }

    /// Whether the tone is sounding.
    pub fn tone_active(&self) -> bool {
        self.tone.is_some()
    }

    /// Replace whatever is playing with `samples`.
    pub fn start_playback(&mut self, samples: Vec<i16>) {
        self.playback = if samples.is_empty() {
            None
        } else {
            Some(Playback {
                samples,
                position: 0,
            })
        };
    }

    /// Cut playback short.
    pub fn stop_playback(&mut self) {
        self.playback = None;
    }

    /// Whether file samples remain to be rendered.
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Render the next output sample in `-1.0..=1.0`.
    pub fn next_sample(&mut self) -> f32 {
        let mut out = 0.0;

        if let Some(tone) = self.tone.as_mut() {
            out += tone.phase.sin() * self.beep_volume;
            tone.phase += tone.step;
            if tone.phase >= TAU {
                tone.phase -= TAU;
            }
        }

        if let Some(playback) = self.playback.as_mut() {
            if let Some(&sample) = playback.samples.get(playback.position) {
                out += f32::from(sample) / f32::from(i16::MAX) * self.volume;
                playback.position += 1;
            }
            if playback.position >= playback.samples.len() {
                self.playback = None;
            }
        }

        out.clamp(-1.0, 1.0)
    }
}
