mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod device_config;
mod hook_config;
mod logging_config;
mod storage_config;
mod timing_config;
mod transfer_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, device_config::DeviceConfig,
    hook_config::HookConfig, logging_config::LoggingConfig, storage_config::StorageConfig,
    timing_config::TimingConfig, transfer_config::TransferConfig,
};

use guestbook_core::{
    DEFAULT_BATCH_BLOCKS, DEFAULT_GREETING, DEFAULT_INDEX_FILE, DEFAULT_QUEUE_BLOCKS,
    DEFAULT_SYSTEM_VOLUME,
};

pub(crate) const DEFAULT_VOLUME: f32 = 0.60;
pub(crate) const DEFAULT_BEEP_VOLUME: f32 = 0.10;
pub(crate) const DEFAULT_GPIO_PATH: &str = "/sys/class/gpio/gpio17/value";
pub(crate) const DEFAULT_LIFTED_LEVEL: u8 = 1;
pub(crate) const DEFAULT_SETTLE_MS: u64 = 40;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 1;
pub(crate) const DEFAULT_PROMPT_DELAY_MS: u64 = 1000;
pub(crate) const DEFAULT_PROMPT_TONE_MS: u64 = 1250;
pub(crate) const DEFAULT_LEAD_IN_MS: u64 = 500;
pub(crate) const DEFAULT_CUE_MS: u64 = 750;
pub(crate) const DEFAULT_LEAD_OUT_MS: u64 = 250;
pub(crate) const DEFAULT_TONE_HZ: f32 = 440.0;
pub(crate) const DEFAULT_CHECK_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_LOG_FILTER: &str = "guestbook=info,guestbook_core=info";
pub(crate) const DEBUG_LOG_FILTER: &str = "guestbook=debug,guestbook_core=debug";

pub(crate) fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

pub(crate) fn default_beep_volume() -> f32 {
    DEFAULT_BEEP_VOLUME
}

pub(crate) fn default_queue_blocks() -> usize {
    DEFAULT_QUEUE_BLOCKS
}

pub(crate) fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

pub(crate) fn default_index_files() -> Vec<String> {
    vec![DEFAULT_INDEX_FILE.to_string()]
}

pub(crate) fn default_system_volume() -> String {
    DEFAULT_SYSTEM_VOLUME.to_string()
}

pub(crate) fn default_gpio_path() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_GPIO_PATH)
}

pub(crate) fn default_lifted_level() -> u8 {
    DEFAULT_LIFTED_LEVEL
}

pub(crate) fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_prompt_delay_ms() -> u64 {
    DEFAULT_PROMPT_DELAY_MS
}

pub(crate) fn default_prompt_tone_ms() -> u64 {
    DEFAULT_PROMPT_TONE_MS
}

pub(crate) fn default_lead_in_ms() -> u64 {
    DEFAULT_LEAD_IN_MS
}

pub(crate) fn default_cue_ms() -> u64 {
    DEFAULT_CUE_MS
}

pub(crate) fn default_lead_out_ms() -> u64 {
    DEFAULT_LEAD_OUT_MS
}

pub(crate) fn default_tone_hz() -> f32 {
    DEFAULT_TONE_HZ
}

pub(crate) fn default_batch_blocks() -> usize {
    DEFAULT_BATCH_BLOCKS
}

pub(crate) fn default_check_interval_ms() -> u64 {
    DEFAULT_CHECK_INTERVAL_MS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
