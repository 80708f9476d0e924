use crate::{CoreError, CoreResult, storage::Storage};

use std::{
    fs::{self, File},
    io::BufWriter,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// [`Storage`] over a directory of the host filesystem, typically the mount
/// point of the removable card.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Use `root` as the volume root. Nothing is touched until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Volume root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Storage for DirStorage {
    type Writer = BufWriter<File>;
    type Reader = File;

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn exists(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn create(&self, name: &str) -> CoreResult<Self::Writer> {
        let file = File::create(self.path_of(name)).map_err(|e| CoreError::FileCreateFailed {
            name: name.to_string(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        debug!(file = name, "File created");
        Ok(BufWriter::new(file))
    }

    #[track_caller]
    fn open(&self, name: &str) -> CoreResult<Self::Reader> {
        Ok(File::open(self.path_of(name))?)
    }

    #[track_caller]
    fn close(&self, writer: Self::Writer) -> CoreResult<()> {
        let file = writer.into_inner().map_err(|e| CoreError::Io {
            source: e.into_error(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        file.sync_all()?;
        Ok(())
    }

    #[track_caller]
    fn list(&self) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

