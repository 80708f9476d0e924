//! Deterministic stand-ins for the hardware collaborators.

use crate::{
    AudioBlock, AudioPipeline, BLOCK_SAMPLES, Clock, CoreError, CoreResult, HookInput,
    SampleQueue, Storage, TransferTask,
};

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    io::{self, Cursor, Seek, SeekFrom, Write},
    panic::Location,
    rc::Rc,
    time::Duration,
};

use error_location::ErrorLocation;

/// Simulated time advanced by one tick per wait spin.
pub const TICK: Duration = Duration::from_millis(1);

/// Convenience for millisecond durations.
pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Clock whose time only moves when a wait spins or a test advances it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn idle(&self) {
        self.advance(TICK);
    }
}

/// Handset that follows a timeline of raw level changes.
#[derive(Debug, Clone)]
pub struct ScriptedHook {
    clock: ManualClock,
    initial: bool,
    changes: Rc<RefCell<Vec<(Duration, bool)>>>,
}

impl ScriptedHook {
    pub fn new(clock: &ManualClock, initial_lifted: bool) -> Self {
        Self {
            clock: clock.clone(),
            initial: initial_lifted,
            changes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Raw level becomes `lifted` at simulated time `at`.
    pub fn set_at(&self, at: Duration, lifted: bool) {
        let mut changes = self.changes.borrow_mut();
        changes.push((at, lifted));
        changes.sort_by_key(|(time, _)| *time);
    }

    pub fn lift_at(&self, at: Duration) {
        self.set_at(at, true);
    }

    pub fn replace_at(&self, at: Duration) {
        self.set_at(at, false);
    }
}

impl HookInput for ScriptedHook {
    fn read_lifted(&mut self) -> bool {
        let now = self.clock.now();
        self.changes
            .borrow()
            .iter()
            .take_while(|(time, _)| *time <= now)
            .last()
            .map_or(self.initial, |(_, lifted)| *lifted)
    }
}

type Files = Rc<RefCell<BTreeMap<String, Vec<u8>>>>;

/// In-memory volume. Clones share the same files and failure switches.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    files: Files,
    available: Rc<Cell<bool>>,
    fail_create: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
    write_budget: Rc<Cell<Option<usize>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            files: Rc::new(RefCell::new(BTreeMap::new())),
            available: Rc::new(Cell::new(true)),
            fail_create: Rc::new(Cell::new(false)),
            fail_writes: Rc::new(Cell::new(false)),
            write_budget: Rc::new(Cell::new(None)),
        }
    }

    pub fn with_files(names: &[&str]) -> Self {
        let storage = Self::new();
        for name in names {
            storage.put(name, Vec::new());
        }
        storage
    }

    pub fn put(&self, name: &str, bytes: Vec<u8>) {
        self.files.borrow_mut().insert(name.to_string(), bytes);
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Accept only `bytes` more bytes across all open files, then fail.
    /// `None` lifts the limit.
    pub fn set_write_budget(&self, bytes: Option<usize>) {
        self.write_budget.set(bytes);
    }
}

/// Write handle that lands in [`MemoryStorage`] on close.
#[derive(Debug)]
pub struct MemoryFile {
    name: String,
    cursor: Cursor<Vec<u8>>,
    fail_writes: Rc<Cell<bool>>,
    write_budget: Rc<Cell<Option<usize>>>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes.get() {
            return Err(io::Error::other("simulated write failure"));
        }
        match self.write_budget.get() {
            Some(0) => Err(io::Error::other("simulated storage full")),
            Some(budget) => {
                let n = budget.min(buf.len());
                self.write_budget.set(Some(budget - n));
                self.cursor.write(&buf[..n])
            }
            None => self.cursor.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Storage for MemoryStorage {
    type Writer = MemoryFile;
    type Reader = Cursor<Vec<u8>>;

    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    #[track_caller]
    fn create(&self, name: &str) -> CoreResult<Self::Writer> {
        if self.fail_create.get() {
            return Err(CoreError::FileCreateFailed {
                name: name.to_string(),
                reason: "simulated create failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.put(name, Vec::new());
        Ok(MemoryFile {
            name: name.to_string(),
            cursor: Cursor::new(Vec::new()),
            fail_writes: Rc::clone(&self.fail_writes),
            write_budget: Rc::clone(&self.write_budget),
        })
    }

    #[track_caller]
    fn open(&self, name: &str) -> CoreResult<Self::Reader> {
        self.get(name)
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()).into())
    }

    fn close(&self, writer: Self::Writer) -> CoreResult<()> {
        self.put(&writer.name, writer.cursor.into_inner());
        Ok(())
    }

    fn list(&self) -> CoreResult<Vec<String>> {
        Ok(self.names())
    }
}

/// Audio pipeline that records every call and plays files for a fixed
/// simulated length.
#[derive(Debug)]
pub struct FakeAudio {
    clock: ManualClock,
    queue: SampleQueue,
    lengths: HashMap<String, Duration>,
    playing_until: Option<Duration>,
    pub tone: Option<f32>,
    pub tones_started: Vec<f32>,
    pub played: Vec<String>,
    pub playback_stops: usize,
}

impl FakeAudio {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            queue: SampleQueue::new(crate::DEFAULT_QUEUE_BLOCKS),
            lengths: HashMap::new(),
            playing_until: None,
            tone: None,
            tones_started: Vec::new(),
            played: Vec::new(),
            playback_stops: 0,
        }
    }

    /// Make `name` playable for `length` of simulated time.
    pub fn with_file(mut self, name: &str, length: Duration) -> Self {
        self.lengths.insert(name.to_string(), length);
        self
    }
}

impl AudioPipeline for FakeAudio {
    fn start_tone(&mut self, frequency_hz: f32) {
        self.tone = Some(frequency_hz);
        self.tones_started.push(frequency_hz);
    }

    fn stop_tone(&mut self) {
        self.tone = None;
    }

    fn capture_queue(&self) -> &SampleQueue {
        &self.queue
    }

    #[track_caller]
    fn play_file(&mut self, name: &str) -> CoreResult<()> {
        let Some(length) = self.lengths.get(name) else {
            return Err(io::Error::new(io::ErrorKind::NotFound, name.to_string()).into());
        };
        self.playing_until = Some(self.clock.now() + *length);
        self.played.push(name.to_string());
        Ok(())
    }

    fn stop_playback(&mut self) {
        if self.playing_until.take().is_some() {
            self.playback_stops += 1;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing_until
            .is_some_and(|until| self.clock.now() < until)
    }
}

/// Transfer task that only remembers what it was told.
#[derive(Debug)]
pub struct FakeTransfer {
    pub checks_enabled: bool,
    pub toggles: Vec<bool>,
}

impl FakeTransfer {
    pub fn new() -> Self {
        Self {
            checks_enabled: true,
            toggles: Vec::new(),
        }
    }
}

impl TransferTask for FakeTransfer {
    fn set_device_checks(&mut self, enabled: bool) {
        self.checks_enabled = enabled;
        self.toggles.push(enabled);
    }

    fn service(&mut self) {}
}

/// A block whose samples all equal `value`.
pub fn block_of(value: i16) -> AudioBlock {
    [value; BLOCK_SAMPLES]
}

/// Push `count` blocks numbered from `first` into an enabled queue.
pub fn feed(queue: &SampleQueue, first: i16, count: usize) {
    for offset in 0..count {
        queue.push(block_of(first + offset as i16));
    }
}
