use crate::{
    CoreError, CoreResult,
    audio::{AudioBlock, AudioPipeline, BLOCK_BYTES},
    device::Mode,
    recorder::{first_unused, recording_name},
    storage::Storage,
    transfer::TransferTask,
    wav::{HEADER_LEN, WavHeader},
};

use std::{
    io::{self, Seek, SeekFrom, Write},
    panic::Location,
    time::Instant,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Default batch threshold: two blocks make one 512-byte storage sector.
pub const DEFAULT_BATCH_BLOCKS: usize = 2;

/// The one open recording.
#[derive(Debug)]
pub struct RecordingSession<W> {
    session_id: Uuid,
    sequence: u32,
    name: String,
    writer: W,
    /// Every byte written to the file so far, header included.
    bytes_written: u64,
    started_at: Instant,
    overruns_at_start: u64,
}

impl<W> RecordingSession<W> {
    /// Log correlation id.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Sequence number encoded in the file name.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// File name on storage.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes written so far, including the reserved header.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// What a finished recording left on storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSummary {
    /// Log correlation id of the session.
    pub session_id: Uuid,
    /// File name on storage.
    pub name: String,
    /// PCM bytes after the header, as stamped into it.
    pub payload_bytes: u32,
    /// Capture blocks lost to queue overruns during the session.
    pub dropped_blocks: u64,
}

/// Drains the capture queue into a WAV file and stamps the header on stop.
///
/// The header region is reserved with a placeholder when the file opens,
/// payload is appended in batches, and the real sizes are written over the
/// placeholder once the length is known.
#[derive(Debug)]
pub struct StreamingRecorder<W> {
    batch_blocks: usize,
    buffer: Vec<u8>,
    session: Option<RecordingSession<W>>,
}

impl<W: Write + Seek> StreamingRecorder<W> {
    /// Create an idle recorder that writes once `batch_blocks` blocks are
    /// queued (minimum 1).
    pub fn new(batch_blocks: usize) -> Self {
        let batch_blocks = batch_blocks.max(1);
        Self {
            batch_blocks,
            buffer: Vec::with_capacity(batch_blocks * BLOCK_BYTES),
            session: None,
        }
    }

    /// Blocks per storage write.
    pub fn batch_blocks(&self) -> usize {
        self.batch_blocks
    }

    /// Whether a session is open.
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&RecordingSession<W>> {
        self.session.as_ref()
    }

    /// Open the next free `NNNNN.wav` and start capturing into it.
    ///
    /// On success the capture queue is enabled, background storage checks
    /// are paused and `mode` becomes [`Mode::Recording`]. On failure nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns error if every sequence number is taken or the file cannot be
    /// created or its header reserved.
    #[track_caller]
    #[instrument(skip(self, mode, storage, audio, transfer))]
    pub fn start<S, A, T>(
        &mut self,
        mode: &mut Mode,
        storage: &S,
        audio: &A,
        transfer: &mut T,
    ) -> CoreResult<()>
    where
        S: Storage<Writer = W>,
        A: AudioPipeline,
        T: TransferTask,
    {
        if let Some(session) = &self.session {
            warn!(file = %session.name, "Recording already in progress");
            *mode = Mode::Recording;
            return Ok(());
        }

        let sequence = first_unused(storage).ok_or_else(|| CoreError::SequenceExhausted {
            location: ErrorLocation::from(Location::caller()),
        })?;
        let name = recording_name(sequence);

        let mut writer = storage.create(&name)?;
        if let Err(e) = writer.write_all(&WavHeader::placeholder().encode()) {
            warn!(file = %name, error = %e, "Header reservation failed, empty file left on storage");
            if let Err(close_err) = storage.close(writer) {
                debug!(file = %name, error = %close_err, "Closing abandoned file failed");
            }
            return Err(CoreError::from(e));
        }

        let queue = audio.capture_queue();
        queue.begin();
        transfer.set_device_checks(false);

        let session = RecordingSession {
            session_id: Uuid::new_v4(),
            sequence,
            name,
            writer,
            bytes_written: HEADER_LEN as u64,
            started_at: Instant::now(),
            overruns_at_start: queue.overruns(),
        };

        info!(
            session_id = %session.session_id,
            file = %session.name,
            "Recording started"
        );

        self.session = Some(session);
        *mode = Mode::Recording;

        Ok(())
    }

    /// Write one batch if a full batch is queued; otherwise do nothing.
    ///
    /// Never waits for data. Must run at least once per queue-depth worth
    /// of audio (see [`crate::audio::DEFAULT_QUEUE_BLOCKS`]) or capture
    /// blocks are dropped. Returns the number of blocks written.
    ///
    /// # Errors
    ///
    /// Returns error if the storage write fails. Bytes of the batch that
    /// reached storage before the failure are still counted, so the final
    /// header matches what is on disk.
    #[track_caller]
    pub fn drain_step<A: AudioPipeline>(&mut self, audio: &A) -> CoreResult<usize> {
        let Some(session) = self.session.as_mut() else {
            return Ok(0);
        };

        let queue = audio.capture_queue();
        if queue.available() < self.batch_blocks {
            return Ok(0);
        }

        self.buffer.clear();
        let mut blocks = 0;
        while blocks < self.batch_blocks {
            let Some(block) = queue.pop() else {
                break;
            };
            append_block(&mut self.buffer, &block);
            blocks += 1;
        }

        write_counted(&mut session.writer, &self.buffer, &mut session.bytes_written)?;

        Ok(blocks)
    }

    /// Finish the open recording.
    ///
    /// Disables capture intake, flushes every queued block (a partial batch
    /// included), rewrites the header with the final sizes and closes the
    /// file. Background storage checks are re-enabled and `mode` becomes
    /// [`Mode::Ready`] even when finalizing fails.
    ///
    /// # Errors
    ///
    /// Returns error if no session is open or the final writes fail.
    #[track_caller]
    #[instrument(skip(self, mode, storage, audio, transfer))]
    pub fn stop<S, A, T>(
        &mut self,
        mode: &mut Mode,
        storage: &S,
        audio: &A,
        transfer: &mut T,
    ) -> CoreResult<RecordingSummary>
    where
        S: Storage<Writer = W>,
        A: AudioPipeline,
        T: TransferTask,
    {
        let Some(session) = self.session.take() else {
            *mode = Mode::Ready;
            return Err(CoreError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let queue = audio.capture_queue();
        queue.end();

        self.buffer.clear();
        let mut flushed = 0usize;
        while let Some(block) = queue.pop() {
            append_block(&mut self.buffer, &block);
            flushed += 1;
        }
        debug!(blocks = flushed, "Flushing capture queue");

        let dropped_blocks = queue.overruns().saturating_sub(session.overruns_at_start);
        let result = finalize(storage, session, &self.buffer, dropped_blocks);

        transfer.set_device_checks(true);
        *mode = Mode::Ready;

        result
    }
}

/// Payload size for a file of `bytes_written` bytes, header included.
///
/// Saturates at the 32-bit limit of the WAV size fields.
pub fn payload_len(bytes_written: u64) -> u32 {
    let payload = bytes_written.saturating_sub(HEADER_LEN as u64);
    u32::try_from(payload).unwrap_or_else(|_| {
        warn!(payload, "Payload exceeds WAV size limit, header truncated");
        u32::MAX
    })
}

/// `write_all` that adds every accepted byte to `counter`, including those
/// of a write that fails partway.
fn write_counted<W: Write>(writer: &mut W, mut buf: &[u8], counter: &mut u64) -> io::Result<()> {
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => {
                *counter += n as u64;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn append_block(buffer: &mut Vec<u8>, block: &AudioBlock) {
    for sample in block {
        buffer.extend_from_slice(&sample.to_le_bytes());
    }
}

#[track_caller]
fn finalize<S: Storage>(
    storage: &S,
    mut session: RecordingSession<S::Writer>,
    tail: &[u8],
    dropped_blocks: u64,
) -> CoreResult<RecordingSummary> {
    if !tail.is_empty() {
        write_counted(&mut session.writer, tail, &mut session.bytes_written)?;
    }

    let payload_bytes = payload_len(session.bytes_written);
    session.writer.seek(SeekFrom::Start(0))?;
    session
        .writer
        .write_all(&WavHeader::for_payload(payload_bytes).encode())?;
    storage.close(session.writer)?;

    if dropped_blocks > 0 {
        warn!(
            session_id = %session.session_id,
            dropped_blocks,
            "Capture queue overran during recording"
        );
    }

    info!(
        session_id = %session.session_id,
        file = %session.name,
        payload_bytes,
        duration_ms = session.started_at.elapsed().as_millis(),
        "Recording stopped"
    );

    Ok(RecordingSummary {
        session_id: session.session_id,
        name: session.name,
        payload_bytes,
        dropped_blocks,
    })
}
