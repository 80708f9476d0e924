use crate::sensor::HookInput;

use std::{fs, path::PathBuf};

use tracing::{info, warn};

/// Handset contact read from a sysfs-style GPIO `value` file.
///
/// The file holds `0` or `1`; `lifted_level` says which of the two means the
/// handset is off the hook. When the file cannot be read the last good level
/// is kept.
#[derive(Debug)]
pub struct GpioValueInput {
    path: PathBuf,
    lifted_level: u8,
    last: bool,
    failing: bool,
}

impl GpioValueInput {
    /// Create an input over `path`. The handset is assumed on the hook until
    /// the first successful read.
    pub fn new(path: impl Into<PathBuf>, lifted_level: u8) -> Self {
        Self {
            path: path.into(),
            lifted_level,
            last: false,
            failing: false,
        }
    }

    fn read_level(&self) -> Option<u8> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match contents.trim() {
            "0" => Some(0),
            "1" => Some(1),
            _ => None,
        }
    }
}

impl HookInput for GpioValueInput {
    fn read_lifted(&mut self) -> bool {
        match self.read_level() {
            Some(level) => {
                if self.failing {
                    info!(path = ?self.path, "Hook switch input readable again");
                    self.failing = false;
                }
                self.last = level == self.lifted_level;
            }
            None => {
                if !self.failing {
                    warn!(path = ?self.path, "Cannot read hook switch input, holding last level");
                    self.failing = true;
                }
            }
        }
        self.last
    }
}
