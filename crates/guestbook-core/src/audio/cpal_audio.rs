use crate::{
    CoreError, CoreResult,
    audio::{AudioPipeline, BlockAssembler, Mixer, SampleQueue, downmix, to_pcm16},
    storage::Storage,
    wav::{SAMPLE_RATE, read_samples},
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard},
};

use cpal::{
    Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig,
    SupportedStreamConfig, SupportedStreamConfigRange,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Levels and sizes for the host audio pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    /// Gain applied to file playback.
    pub volume: f32,
    /// Gain applied to the tone generator.
    pub beep_volume: f32,
    /// Capture queue depth in blocks.
    pub queue_blocks: usize,
}

/// [`AudioPipeline`] on the default cpal input and output devices.
///
/// Capture runs mono 16-bit at 44.1 kHz into a [`SampleQueue`]; the output
/// stream renders a [`Mixer`]. Recordings are loaded whole into memory for
/// playback.
pub struct CpalAudio<S> {
    storage: S,
    queue: SampleQueue,
    mixer: Arc<Mutex<Mixer>>,
    _input: Stream,
    _output: Stream,
}

impl<S: Storage> CpalAudio<S> {
    /// Open both default devices and start their streams.
    ///
    /// # Errors
    ///
    /// Returns error if either device is missing or cannot run at 44.1 kHz.
    #[track_caller]
    #[instrument(skip(storage))]
    pub fn new(settings: AudioSettings, storage: S) -> CoreResult<Self> {
        let host = cpal::default_host();

        let input_device = host
            .default_input_device()
            .ok_or_else(|| device_error("No audio input device found".to_string()))?;
        let output_device = host
            .default_output_device()
            .ok_or_else(|| device_error("No audio output device found".to_string()))?;

        let input_ranges = input_device
            .supported_input_configs()
            .map_err(|e| device_error(format!("Failed to query input configs: {}", e)))?;
        let input_config = pick_config(input_ranges)
            .ok_or_else(|| device_error(format!("Input cannot run at {} Hz", SAMPLE_RATE)))?;

        let output_ranges = output_device
            .supported_output_configs()
            .map_err(|e| device_error(format!("Failed to query output configs: {}", e)))?;
        let output_config = pick_config(output_ranges)
            .ok_or_else(|| device_error(format!("Output cannot run at {} Hz", SAMPLE_RATE)))?;

        let queue = SampleQueue::new(settings.queue_blocks);
        let mixer = Arc::new(Mutex::new(Mixer::new(
            settings.volume,
            settings.beep_volume,
        )));

        let input = build_input(&input_device, input_config, queue.clone())?;
        let output = build_output(&output_device, output_config, Arc::clone(&mixer))?;

        input
            .play()
            .map_err(|e| device_error(format!("Failed to start input stream: {}", e)))?;
        output
            .play()
            .map_err(|e| device_error(format!("Failed to start output stream: {}", e)))?;

        info!(
            sample_rate = SAMPLE_RATE,
            queue_blocks = queue.capacity(),
            "Audio pipeline started"
        );

        Ok(Self {
            storage,
            queue,
            mixer,
            _input: input,
            _output: output,
        })
    }

    fn mixer(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap_or_else(|e| {
            error!("Mixer lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl<S: Storage> AudioPipeline for CpalAudio<S> {
    fn start_tone(&mut self, frequency_hz: f32) {
        self.mixer().start_tone(frequency_hz);
    }

    fn stop_tone(&mut self) {
        self.mixer().stop_tone();
    }

    fn capture_queue(&self) -> &SampleQueue {
        &self.queue
    }

    #[track_caller]
    fn play_file(&mut self, name: &str) -> CoreResult<()> {
        let reader = self.storage.open(name)?;
        let samples = read_samples(reader)?;
        debug!(file = name, samples = samples.len(), "Playback loaded");
        self.mixer().start_playback(samples);
        Ok(())
    }

    fn stop_playback(&mut self) {
        self.mixer().stop_playback();
    }

    fn is_playing(&self) -> bool {
        self.mixer().is_playing()
    }
}

#[track_caller]
fn device_error(reason: String) -> CoreError {
    CoreError::DeviceError {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Pick a 44.1 kHz config, preferring float samples and fewer channels.
fn pick_config<I>(ranges: I) -> Option<SupportedStreamConfig>
where
    I: Iterator<Item = SupportedStreamConfigRange>,
{
    ranges
        .filter(|r| matches!(r.sample_format(), SampleFormat::F32 | SampleFormat::I16))
        .filter(|r| r.min_sample_rate() <= SAMPLE_RATE && SAMPLE_RATE <= r.max_sample_rate())
        .map(|r| r.with_sample_rate(SAMPLE_RATE))
        .min_by_key(|c| (c.sample_format() != SampleFormat::F32, c.channels()))
}

#[track_caller]
fn build_input(
    device: &Device,
    supported: SupportedStreamConfig,
    queue: SampleQueue,
) -> CoreResult<Stream> {
    let format = supported.sample_format();
    let config: StreamConfig = supported.into();
    match format {
        SampleFormat::I16 => build_input_typed::<i16>(device, &config, queue),
        _ => build_input_typed::<f32>(device, &config, queue),
    }
}

#[track_caller]
fn build_input_typed<T>(
    device: &Device,
    config: &StreamConfig,
    queue: SampleQueue,
) -> CoreResult<Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = usize::from(config.channels.max(1));
    let mut assembler = BlockAssembler::new();
    let mut frame = Vec::with_capacity(channels);

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if !queue.is_active() {
                    assembler.reset();
                    return;
                }
                for samples in data.chunks(channels) {
                    frame.clear();
                    frame.extend(samples.iter().map(|s| s.to_sample::<f32>()));
                    if let Some(block) = assembler.push(to_pcm16(downmix(&frame))) {
                        queue.push(block);
                    }
                }
            },
            |err| {
                error!("Audio input stream error: {}", err);
            },
            None,
        )
        .map_err(|e| device_error(format!("Failed to build input stream: {}", e)))
}

#[track_caller]
fn build_output(
    device: &Device,
    supported: SupportedStreamConfig,
    mixer: Arc<Mutex<Mixer>>,
) -> CoreResult<Stream> {
    let format = supported.sample_format();
    let config: StreamConfig = supported.into();
    match format {
        SampleFormat::I16 => build_output_typed::<i16>(device, &config, mixer),
        _ => build_output_typed::<f32>(device, &config, mixer),
    }
}

#[track_caller]
fn build_output_typed<T>(
    device: &Device,
    config: &StreamConfig,
    mixer: Arc<Mutex<Mixer>>,
) -> CoreResult<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = usize::from(config.channels.max(1));

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut mixer = mixer.lock().unwrap_or_else(|e| e.into_inner());
                for frame in data.chunks_mut(channels) {
                    let value = T::from_sample(mixer.next_sample());
                    for out in frame.iter_mut() {
                        *out = value;
                    }
                }
            },
            |err| {
                error!("Audio output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| device_error(format!("Failed to build output stream: {}", e)))
}
