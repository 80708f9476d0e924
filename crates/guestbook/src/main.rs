//! Guestbook: telephone audio guestbook driven by the handset switch.

mod app;
mod config;
mod error;
mod logging;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
};

use crate::{app::request_shutdown, config::Config};

use std::{
    panic::Location,
    sync::{Arc, atomic::AtomicBool},
    time::Duration,
};

use error_location::ErrorLocation;
use tracing::{error, info, warn};

/// How long the control loop gets to finalize a recording after Ctrl+C.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Application entry point.
fn main() {
    let loaded = Config::load();
    let logging_config = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();

    let guard = match logging::init(&logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(run(config));

    // A control loop stuck in playback is abandoned rather than joined.
    rt.shutdown_timeout(Duration::from_millis(100));

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            error!(error = ?e, "Guestbook exited with error");
            1
        }
    };

    drop(guard);
    std::process::exit(code);
}

/// Run the control loop on a blocking thread until it fails or Ctrl+C.
async fn run(config: Config) -> AppResult<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let app = App::new(config, Arc::clone(&shutdown));
    let mut handle = tokio::task::spawn_blocking(move || app.run());

    tokio::select! {
        joined = &mut handle => {
            return joined.map_err(|e| AppError::Runtime {
                reason: format!("Control loop panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = ?e, "Failed to listen for Ctrl+C");
            }
            info!("Shutdown requested");
        }
    }

    request_shutdown(&shutdown);

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::Runtime {
            reason: format!("Control loop panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }),
        Err(_) => {
            warn!("Control loop did not stop within timeout, exiting anyway");
            Ok(())
        }
    }
}
