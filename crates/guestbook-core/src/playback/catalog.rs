use crate::{CoreResult, device::ReservedNames, storage::Storage};

use tracing::{info, instrument};

/// Recordings available for playback, fixed when the catalog is built.
///
/// The entries never change afterwards; only the cursor moves. Names are
/// sorted lexicographically, which is numeric order for the fixed-width
/// recording names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Box<[String]>,
    cursor: usize,
}

impl Catalog {
    /// Build from a directory listing, dropping reserved names.
    pub fn from_names<I>(names: I, reserved: &ReservedNames) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries: Vec<String> = names
            .into_iter()
            .filter(|name| !reserved.is_reserved(name))
            .collect();
        entries.sort();
        Self {
            entries: entries.into_boxed_slice(),
            cursor: 0,
        }
    }

    /// List `storage` once and build the catalog from it.
    ///
    /// # Errors
    ///
    /// Returns error if the volume cannot be listed.
    #[track_caller]
    #[instrument(skip(storage, reserved))]
    pub fn scan<S: Storage>(storage: &S, reserved: &ReservedNames) -> CoreResult<Self> {
        let catalog = Self::from_names(storage.list()?, reserved);
        info!(entries = catalog.len(), "Playback catalog built");
        Ok(catalog)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in playback order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the next entry to play.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor, `None` when the catalog is empty.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Move to the next entry, wrapping to the first after the last. Does
    /// nothing on an empty catalog.
    pub fn advance(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_names(Vec::new(), &ReservedNames::default())
    }
}
