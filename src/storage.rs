//! Whole-file reads and all-or-nothing writes.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{HuffmanError, Result};

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| HuffmanError::storage(path, e))?;
    debug!(path = %path.display(), len = bytes.len(), "read file");
    Ok(bytes)
}

/// Write `bytes` to `path`.
///
/// The data goes to a temporary file next to `path` first and is renamed
/// over it once fully written, so a failure never leaves a partial file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| HuffmanError::storage(path, e))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| HuffmanError::storage(path, e))?;
    file.persist(path)
        .map_err(|e| HuffmanError::storage(path, e.error))?;

    debug!(path = %path.display(), len = bytes.len(), "wrote file");
    Ok(())
}
