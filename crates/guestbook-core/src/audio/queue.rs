use std::{
    collections::VecDeque,
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use tracing::error;

/// Samples per capture block.
pub const BLOCK_SAMPLES: usize = 128;

/// Bytes per capture block once written as 16-bit PCM.
pub const BLOCK_BYTES: usize = BLOCK_SAMPLES * 2;

/// Default queue depth in blocks.
///
/// **Drain budget at this depth:**
/// - 53 blocks * 128 samples / 44,100 Hz = ~154ms
/// - The control loop must drain at least once in that window or the
///   capture side starts dropping blocks
pub const DEFAULT_QUEUE_BLOCKS: usize = 53;

/// One fixed-size block of mono 16-bit samples.
pub type AudioBlock = [i16; BLOCK_SAMPLES];

/// Bounded single-producer/single-consumer queue of capture blocks.
///
/// Cloning yields another handle to the same queue, so the capture callback
/// and the recorder can each hold one. When the queue is full, new blocks
/// are dropped and counted in [`SampleQueue::overruns`]; nothing else
/// reacts to an overrun.
#[derive(Clone)]
pub struct SampleQueue {
    inner: Arc<Inner>,
}

struct Inner {
    blocks: Mutex<VecDeque<AudioBlock>>,
    capacity: usize,
    active: AtomicBool,
    overruns: AtomicU64,
}

impl SampleQueue {
    /// Create a disabled queue holding at most `capacity` blocks (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                blocks: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                active: AtomicBool::new(false),
                overruns: AtomicU64::new(0),
            }),
        }
    }

    /// Discard anything left from a previous session and start accepting
    /// blocks.
    pub fn begin(&self) {
        self.lock().clear();
        self.inner.active.store(true, Ordering::Release);
    }

    /// Stop accepting blocks. Blocks already queued stay readable.
    pub fn end(&self) {
        self.inner.active.store(false, Ordering::Release);
    }

    /// Whether [`SampleQueue::push`] currently accepts blocks.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Producer side. Returns `false` if the block was not queued, either
    /// because intake is disabled or because the queue is full.
    pub fn push(&self, block: AudioBlock) -> bool {
        if !self.is_active() {
            return false;
        }
        let mut blocks = self.lock();
        if blocks.len() >= self.inner.capacity {
            self.inner.overruns.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        blocks.push_back(block);
        true
    }

    /// Number of blocks ready to read.
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    /// Consumer side. Moves the oldest block out of the queue.
    pub fn pop(&self) -> Option<AudioBlock> {
        self.lock().pop_front()
    }

    /// Blocks dropped because the queue was full, since creation.
    pub fn overruns(&self) -> u64 {
        self.inner.overruns.load(Ordering::Relaxed)
    }

    /// Maximum number of queued blocks.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<AudioBlock>> {
        // A poisoned lock still holds valid blocks; keep using them.
        self.inner.blocks.lock().unwrap_or_else(|e| {
            error!("Sample queue lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl fmt::Debug for SampleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleQueue")
            .field("capacity", &self.inner.capacity)
            .field("available", &self.available())
            .field("active", &self.is_active())
            .field("overruns", &self.overruns())
            .finish()
    }
}
