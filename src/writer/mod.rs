//! Writer backends that persist a finished [`Document`].

pub mod elements;
pub mod pdf;

use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::model::Document;

pub use pdf::PdfWriter;

/// Serializes a finished document to a file.
///
/// Implementations must not leave a partial file behind when they fail.
pub trait DocumentWriter {
    /// Serializes `document` and stores it at `path`, replacing any existing file.
    fn write(&mut self, document: &Document, path: &Path) -> Result<()>;
}

/// Stores `bytes` at `path` through a sibling temporary file.
///
/// The target is only replaced once every byte has been written, so a failed
/// write leaves any previous file untouched and no partial file behind.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    debug!("Moving {} into place", file.path().display());
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
