//! Configuration management for the guestbook.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, lazy validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        AudioConfig, DeviceConfig, HookConfig, LoggingConfig, StorageConfig, TimingConfig,
        TransferConfig,
    },
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use guestbook_core::DeviceSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Operating mode.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Recordings volume.
    pub storage: StorageConfig,
    /// Output levels and capture buffering.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Hook switch input.
    #[serde(default)]
    pub hook: HookConfig,
    /// Prompt and playback pacing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Background storage checks.
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default one if none exists.
    ///
    /// Values are not validated here; call [`Config::validate`] before
    /// building the device.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from an explicit path.
    #[track_caller]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Check the values the device cannot run with.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        let fail = |reason: String| AppError::ConfigError {
            reason,
            location: ErrorLocation::from(Location::caller()),
        };

        for (name, gain) in [
            ("audio.volume", self.audio.volume),
            ("audio.beep_volume", self.audio.beep_volume),
        ] {
            if !(0.0..=1.0).contains(&gain) {
                return Err(fail(format!("{} must be within 0.0..=1.0, got {}", name, gain)));
            }
        }

        if self.timing.batch_blocks == 0 {
            return Err(fail("timing.batch_blocks must be at least 1".to_string()));
        }

        if self.audio.queue_blocks < self.timing.batch_blocks {
            return Err(fail(format!(
                "audio.queue_blocks ({}) cannot hold one batch of {} blocks",
                self.audio.queue_blocks, self.timing.batch_blocks
            )));
        }

        if self.hook.lifted_level > 1 {
            return Err(fail(format!(
                "hook.lifted_level must be 0 or 1, got {}",
                self.hook.lifted_level
            )));
        }

        if self.storage.greeting.is_empty() {
            return Err(fail("storage.greeting must not be empty".to_string()));
        }

        Ok(())
    }

    /// Settings for the core state machine.
    pub fn device_settings(&self) -> DeviceSettings {
        DeviceSettings {
            operating_mode: self.device.operating_mode,
            names: self.storage.reserved_names(),
            timing: self.timing.timing(self.hook.settle()),
            batch_blocks: self.timing.batch_blocks,
        }
    }

    /// Save configuration using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Defaults with recordings kept under `root`.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            device: DeviceConfig::default(),
            storage: StorageConfig {
                root,
                greeting: crate::config::default_greeting(),
                index_files: crate::config::default_index_files(),
                system_volume: crate::config::default_system_volume(),
            },
            audio: AudioConfig::default(),
            hook: HookConfig::default(),
            timing: TimingConfig::default(),
            transfer: TransferConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "guestbook", "Guestbook").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let root = Self::project_dirs()?.data_dir().join("recordings");
        let config = Self::with_root(root.clone());

        config.save_to(config_path)?;

        warn!(
            root = ?root,
            "Default config created. Point storage.root at the recordings volume."
        );

        Ok(config)
    }
}
