use crate::{AppError, AppResult, config::LoggingConfig};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the daily log files.
pub(crate) const LOG_FILE_PREFIX: &str = "guestbook.log";

/// Install the global subscriber: console output plus, when a directory is
/// configured, a daily rolling file.
///
/// `RUST_LOG` overrides the configured filter. The returned guard flushes the
/// file writer and must be held until exit.
#[track_caller]
pub(crate) fn init(config: &LoggingConfig) -> AppResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.effective_filter()))
        .map_err(|e| AppError::LoggingError {
            reason: format!("Invalid log filter {:?}: {}", config.effective_filter(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::LoggingError {
            reason: format!("Failed to install subscriber: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(guard)
}
