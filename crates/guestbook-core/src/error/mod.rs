use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Device core errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage could not be reached (card missing, mount point gone).
    #[error("Storage unavailable: {reason} {location}")]
    StorageUnavailable {
        /// Description of what was checked.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A new file could not be created on storage.
    #[error("Failed to create {name}: {reason} {location}")]
    FileCreateFailed {
        /// Name of the file that was being created.
        name: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Every five-digit recording name is already taken.
    #[error("No unused recording sequence number left {location}")]
    SequenceExhausted {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stop requested with no recording session open.
    #[error("No recording in progress {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Bytes at the start of a file are not a header this device writes.
    #[error("Invalid WAV header: {reason} {location}")]
    InvalidWavHeader {
        /// Which field failed validation.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A WAV file could not be decoded.
    #[error("Failed to read WAV: {reason} {location}")]
    WavReadFailed {
        /// Decoder error message.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A WAV file decodes but cannot be played at the device rate.
    #[error("Unsupported WAV format: {reason} {location}")]
    UnsupportedWavFormat {
        /// Which property is unsupported.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from a storage operation.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
