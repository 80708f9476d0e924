use crate::{
    CoreError, CoreResult,
    audio::to_pcm16,
    wav::{HEADER_LEN, SAMPLE_RATE, WavHeader},
};

use std::{
    io::{Cursor, Read},
    panic::Location,
};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavReader};
use tracing::{debug, warn};

/// Read a whole WAV file and return its samples as mono 16-bit PCM.
///
/// Files written by this device and files authored elsewhere (extra chunks,
/// stereo, other bit depths) are both accepted; anything not at 44.1 kHz is
/// rejected. A file whose header still carries the placeholder size (power
/// lost before the header rewrite) yields everything after the header.
#[track_caller]
pub fn read_samples<R: Read>(mut reader: R) -> CoreResult<Vec<i16>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if matches!(WavHeader::parse(&bytes), Ok(header) if header == WavHeader::placeholder()) {
        let payload = &bytes[HEADER_LEN..];
        warn!(payload = payload.len(), "Header was never finalized");
        return Ok(decode_pcm(payload));
    }

    let wav = WavReader::new(Cursor::new(bytes)).map_err(|e| CoreError::WavReadFailed {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let spec = wav.spec();
    if spec.sample_rate != SAMPLE_RATE {
        return Err(CoreError::UnsupportedWavFormat {
            reason: format!(
                "sample rate is {} Hz, expected {} Hz",
                spec.sample_rate, SAMPLE_RATE
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let channels = usize::from(spec.channels.max(1));
    debug!(
        channels,
        bits = spec.bits_per_sample,
        format = ?spec.sample_format,
        "Decoding WAV"
    );

    let interleaved = match spec.sample_format {
        SampleFormat::Int => {
            let shift = i32::from(spec.bits_per_sample) - 16;
            collect_until_eof(wav.into_samples::<i32>().map(|s| {
                s.map(|v| {
                    if shift >= 0 {
                        v >> shift
                    } else {
                        v << -shift
                    }
                })
            }))
        }
        SampleFormat::Float => collect_until_eof(
            wav.into_samples::<f32>()
                .map(|s| s.map(|v| i32::from(to_pcm16(v)))),
        ),
    };

    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().sum();
            (sum / frame.len() as i32).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
        })
        .collect())
}

/// Take samples until the first read error. A file cut short plays up to
/// where it ends.
fn collect_until_eof<I>(samples: I) -> Vec<i32>
where
    I: Iterator<Item = Result<i32, hound::Error>>,
{
    let mut out = Vec::new();
    for sample in samples {
        match sample {
            Ok(value) => out.push(value),
            Err(e) => {
                warn!(error = %e, read = out.len(), "Payload shorter than header declares");
                break;
            }
        }
    }
    out
}

fn decode_pcm(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
