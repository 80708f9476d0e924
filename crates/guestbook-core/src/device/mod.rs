mod machine;
mod mode;
mod settings;

pub use {
    machine::Device,
    mode::{Mode, OperatingMode},
    settings::{
        DEFAULT_GREETING, DEFAULT_INDEX_FILE, DEFAULT_SYSTEM_VOLUME, DeviceSettings,
        ReservedNames, Timing,
    },
};
