use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Size of the container header in bytes. The payload starts right after it,
/// so the payload length of a recording is always `bytes_written - HEADER_LEN`.
pub const HEADER_LEN: usize = 44;

/// Sample rate of every file this device writes.
pub const SAMPLE_RATE: u32 = 44_100;
/// Channel count of every file this device writes.
pub const CHANNELS: u16 = 1;
/// Bit depth of every file this device writes.
pub const BITS_PER_SAMPLE: u16 = 16;

const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT: u16 = 1;
/// RIFF chunk size is the payload size plus this amount.
const RIFF_SIZE_OVERHEAD: u32 = 34;

const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;
const BYTE_RATE: u32 = SAMPLE_RATE * BLOCK_ALIGN as u32;

/// The fixed 44-byte RIFF/WAVE header written in front of the PCM payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    data_len: u32,
}

impl WavHeader {
    /// Header written when a recording opens, before the size is known.
    pub fn placeholder() -> Self {
        Self { data_len: 0 }
    }

    /// Header describing a payload of `data_len` bytes.
    pub fn for_payload(data_len: u32) -> Self {
        Self { data_len }
    }

    /// Payload byte count declared by the `data` subchunk.
    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    /// Value of the RIFF chunk size field.
    pub fn riff_len(&self) -> u32 {
        self.data_len.saturating_add(RIFF_SIZE_OVERHEAD)
    }

    /// Encode to the on-disk little-endian layout.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(b"RIFF");
        buf[4..8].copy_from_slice(&self.riff_len().to_le_bytes());
        buf[8..12].copy_from_slice(b"WAVE");
        buf[12..16].copy_from_slice(b"fmt ");
        buf[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        buf[20..22].copy_from_slice(&PCM_FORMAT.to_le_bytes());
        buf[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
        buf[24..28].copy_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf[28..32].copy_from_slice(&BYTE_RATE.to_le_bytes());
        buf[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
        buf[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        buf[36..40].copy_from_slice(b"data");
        buf[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        buf
    }

    /// Parse and validate a header produced by [`WavHeader::encode`].
    ///
    /// Only the format written by this device is accepted: PCM, mono,
    /// 44.1 kHz, 16-bit.
    #[track_caller]
    pub fn parse(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(invalid(format!(
                "expected {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        expect_field("fmt chunk size", read_u32(bytes, 16), FMT_CHUNK_LEN)?;
        expect_field("audio format", u32::from(read_u16(bytes, 20)), u32::from(PCM_FORMAT))?;
        expect_field("channel count", u32::from(read_u16(bytes, 22)), u32::from(CHANNELS))?;
        expect_field("sample rate", read_u32(bytes, 24), SAMPLE_RATE)?;
        expect_field(
            "bits per sample",
            u32::from(read_u16(bytes, 34)),
            u32::from(BITS_PER_SAMPLE),
        )?;

        Ok(Self {
            data_len: read_u32(bytes, 40),
        })
    }
}

#[track_caller]
fn invalid(reason: String) -> CoreError {
    CoreError::InvalidWavHeader {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> CoreResult<()> {
    if &bytes[offset..offset + 4] != tag {
        return Err(invalid(format!(
            "missing {:?} tag at offset {}",
            String::from_utf8_lossy(tag),
            offset
        )));
    }
    Ok(())
}

#[track_caller]
fn expect_field(name: &str, found: u32, expected: u32) -> CoreResult<()> {
    if found != expected {
        return Err(invalid(format!("{} is {}, expected {}", name, found, expected)));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
