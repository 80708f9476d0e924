mod dir;

pub use dir::DirStorage;

use crate::CoreResult;

use std::io::{Read, Seek, Write};

/// Persistent file store holding the greeting and the recordings.
///
/// Names are flat file names relative to the volume root.
pub trait Storage {
    /// Handle returned by [`Storage::create`].
    type Writer: Write + Seek;
    /// Handle returned by [`Storage::open`].
    type Reader: Read;

    /// Whether the volume can currently be used.
    fn is_available(&self) -> bool;

    /// Whether a file called `name` exists.
    fn exists(&self, name: &str) -> bool;

    /// Create (or truncate) `name` for writing.
    fn create(&self, name: &str) -> CoreResult<Self::Writer>;

    /// Open `name` for reading.
    fn open(&self, name: &str) -> CoreResult<Self::Reader>;

    /// Flush and release a handle from [`Storage::create`].
    fn close(&self, writer: Self::Writer) -> CoreResult<()>;

    /// Names of the files at the volume root, in no particular order.
    fn list(&self) -> CoreResult<Vec<String>>;
}
