//! Monotonic time source used by the debouncer and every wait.

use std::time::{Duration, Instant};

/// Monotonic elapsed-time source.
///
/// `idle` is called once per spin of a wait loop. Waits never block on a
/// timer anywhere else, so this is the only place where the control loop
/// gives up the CPU.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Spend one poll interval.
    fn idle(&self);
}

/// Wall-time clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    poll_interval: Duration,
}

impl SystemClock {
    /// Create a clock whose `idle` sleeps for `poll_interval`.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            poll_interval,
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn idle(&self) {
        if self.poll_interval.is_zero() {
            std::hint::spin_loop();
        } else {
            std::thread::sleep(self.poll_interval);
        }
    }
}
