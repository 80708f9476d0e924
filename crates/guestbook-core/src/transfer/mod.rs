//! Background task that exposes the storage volume to a host computer.
//!
//! The control core only needs two things from it: a way to pause its
//! periodic device checks while a recording is being written, and a single
//! service step per scheduling-loop iteration.

mod watch;

pub use watch::StorageWatch;

/// Control surface of the storage-transfer background task.
pub trait TransferTask {
    /// Enable or disable the periodic storage-availability checks.
    fn set_device_checks(&mut self, enabled: bool);

    /// Run one bounded unit of background work.
    fn service(&mut self);
}
