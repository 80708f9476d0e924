use crate::{AppError, AppResult, config::Config};

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use guestbook_core::{
    Clock, CoreError, CpalAudio, Device, DirStorage, GpioValueInput, StorageWatch, SystemClock,
    TransferTask,
};
use tracing::{error, info, instrument};

/// Interval between two reports of a fatal start-up failure.
pub(crate) const HALT_REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// The scheduling loop.
///
/// Runs on a blocking thread: the audio streams and the device are built
/// there and never leave it.
pub struct App {
    pub(crate) config: Config,
    pub(crate) shutdown: Arc<AtomicBool>,
}

impl App {
    pub(crate) fn new(config: Config, shutdown: Arc<AtomicBool>) -> Self {
        Self { config, shutdown }
    }

    /// Build the device and step it until shutdown is requested.
    ///
    /// A failure to bring up audio or storage is fatal: the loop halts and
    /// keeps reporting the failure until shutdown, then returns it.
    #[instrument(skip(self), fields(operating_mode = %self.config.device.operating_mode))]
    pub(crate) fn run(self) -> AppResult<()> {
        info!(root = ?self.config.storage.root, "Guestbook starting");

        let storage = DirStorage::new(&self.config.storage.root);
        let clock = SystemClock::new(self.config.hook.poll_interval());

        let audio = match CpalAudio::new(self.config.audio.audio_settings(), storage.clone()) {
            Ok(audio) => audio,
            Err(e) => return Err(self.halt(e)),
        };

        let input = GpioValueInput::new(&self.config.hook.gpio_path, self.config.hook.lifted_level);
        let mut watch = StorageWatch::new(
            storage.clone(),
            clock.clone(),
            self.config.transfer.check_interval(),
        );
        let mut device = Device::new(
            self.config.device_settings(),
            storage,
            audio,
            input,
            clock.clone(),
        );

        if let Err(e) = device.boot() {
            return Err(self.halt(e));
        }

        while !self.shutdown_requested() {
            device.step(&mut watch);
            watch.service();
            clock.idle();
        }

        if let Some(summary) = device.shutdown(&mut watch) {
            info!(
                session_id = %summary.session_id,
                file = %summary.name,
                "Recording closed on shutdown"
            );
        }
        info!("Guestbook stopped");

        Ok(())
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Report `error` every [`HALT_REPORT_INTERVAL`] until shutdown.
    fn halt(&self, error: CoreError) -> AppError {
        while !self.shutdown_requested() {
            error!(error = %error, "Fatal start-up failure, device halted");
            std::thread::sleep(HALT_REPORT_INTERVAL);
        }
        error.into()
    }
}

/// Request shutdown of a running [`App`].
pub(crate) fn request_shutdown(flag: &AtomicBool) {
    flag.store(true, Ordering::Release);
}
