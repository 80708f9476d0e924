use crate::{clock::Clock, storage::Storage, transfer::TransferTask};

use std::time::Duration;

use tracing::{debug, info, warn};

/// [`TransferTask`] that keeps an eye on the storage volume.
///
/// While checks are enabled it re-tests availability once per interval and
/// logs every change, so a card pulled or re-inserted by the host shows up
/// in the log.
pub struct StorageWatch<S, C> {
    storage: S,
    clock: C,
    interval: Duration,
    checks_enabled: bool,
    last_check: Option<Duration>,
    available: bool,
    checks_run: u64,
}

impl<S: Storage, C: Clock> StorageWatch<S, C> {
    /// Watch `storage`, checking every `interval` while enabled.
    pub fn new(storage: S, clock: C, interval: Duration) -> Self {
        let available = storage.is_available();
        Self {
            storage,
            clock,
            interval,
            checks_enabled: true,
            last_check: None,
            available,
            checks_run: 0,
        }
    }

    /// Whether periodic checks are currently running.
    pub fn checks_enabled(&self) -> bool {
        self.checks_enabled
    }

    /// Availability seen by the latest check.
    pub fn available(&self) -> bool {
        self.available
    }

    /// Number of availability checks performed.
    pub fn checks_run(&self) -> u64 {
        self.checks_run
    }
}

impl<S: Storage, C: Clock> TransferTask for StorageWatch<S, C> {
    fn set_device_checks(&mut self, enabled: bool) {
        if self.checks_enabled != enabled {
            debug!(enabled, "Storage device checks toggled");
        }
        self.checks_enabled = enabled;
        // Restart the interval so a check does not fire right after a
        // recording closes its file.
        self.last_check = Some(self.clock.now());
    }

    fn service(&mut self) {
        if !self.checks_enabled {
            return;
        }

        let now = self.clock.now();
        if let Some(last) = self.last_check
            && now.saturating_sub(last) < self.interval
        {
            return;
        }
        self.last_check = Some(now);
        self.checks_run += 1;

        let available = self.storage.is_available();
        if available != self.available {
            if available {
                info!("Storage volume available again");
            } else {
                warn!("Storage volume no longer available");
            }
            self.available = available;
        }
    }
}
