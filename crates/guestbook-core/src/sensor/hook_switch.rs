use crate::{
    clock::Clock,
    sensor::{Debouncer, Edge},
};

use std::time::Duration;

use tracing::debug;

/// Raw handset contact.
pub trait HookInput {
    /// Current undebounced level, `true` while the handset is lifted.
    fn read_lifted(&mut self) -> bool;
}

/// Result of an interruptible wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration (or condition) elapsed.
    Completed,
    /// The abort edge fired before the wait finished.
    Interrupted,
}

impl WaitOutcome {
    /// `true` when the wait was cut short by the abort edge.
    pub fn interrupted(self) -> bool {
        matches!(self, WaitOutcome::Interrupted)
    }
}

/// Debounced handset sensor plus the cooperative waits built on it.
///
/// Every delay in the control loop goes through [`HookSwitch::wait`] or
/// [`HookSwitch::wait_until`], which re-poll the contact on every spin. The
/// waits only report an interruption; deciding the next mode is the caller's
/// job.
pub struct HookSwitch<H, C> {
    input: H,
    clock: C,
    debouncer: Debouncer,
}

impl<H: HookInput, C: Clock> HookSwitch<H, C> {
    /// Wrap a raw input. The first raw reading becomes the stable level, so
    /// a handset that is already off the hook at power-up yields no edge.
    pub fn new(mut input: H, clock: C, settle: Duration) -> Self {
        let initial = input.read_lifted();
        let debouncer = Debouncer::new(settle, initial, clock.now());
        debug!(
            lifted = initial,
            settle_ms = debouncer.settle().as_millis(),
            "Hook switch initialized"
        );
        Self {
            input,
            clock,
            debouncer,
        }
    }

    /// Sample the contact once and return the edge this poll produced.
    pub fn poll(&mut self) -> Edge {
        let raw = self.input.read_lifted();
        let edge = self.debouncer.update(raw, self.clock.now());
        if edge != Edge::None {
            debug!(?edge, "Hook switch edge");
        }
        edge
    }

    /// `true` if the latest poll saw the handset being picked up.
    pub fn lifted(&self) -> bool {
        self.debouncer.edge() == Edge::Lifted
    }

    /// `true` if the latest poll saw the handset being put down.
    pub fn replaced(&self) -> bool {
        self.debouncer.edge() == Edge::Replaced
    }

    /// Debounced level.
    pub fn is_lifted(&self) -> bool {
        self.debouncer.is_lifted()
    }

    /// Time source shared with the waits.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Busy-wait for `duration`, polling the contact on every spin.
    ///
    /// Returns [`WaitOutcome::Interrupted`] as soon as a poll yields
    /// `abort_on`.
    pub fn wait(&mut self, duration: Duration, abort_on: Edge) -> WaitOutcome {
        let start = self.clock.now();
        self.spin(abort_on, |clock| {
            clock.now().saturating_sub(start) >= duration
        })
    }

    /// Spin until `done` returns `true`, polling the contact on every spin.
    ///
    /// Used to follow playback to its end while staying responsive; the
    /// granularity of the check is one clock idle.
    pub fn wait_until<F>(&mut self, abort_on: Edge, mut done: F) -> WaitOutcome
    where
        F: FnMut() -> bool,
    {
        self.spin(abort_on, |_| done())
    }

    fn spin<F>(&mut self, abort_on: Edge, mut finished: F) -> WaitOutcome
    where
        F: FnMut(&C) -> bool,
    {
        loop {
            if self.poll() == abort_on && abort_on != Edge::None {
                return WaitOutcome::Interrupted;
            }
            if finished(&self.clock) {
                return WaitOutcome::Completed;
            }
            self.clock.idle();
        }
    }
}
