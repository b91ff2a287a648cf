//! Whole-file reads and crash-safe replacement writes.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::{FsResultExt, GlideError, Result};

/// Reads `path`, treating a missing or whitespace-only file as absent.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            Err(GlideError::corrupt(path, "file is not valid UTF-8"))
        }
        Err(e) => Err(e).fs_context(path),
    }
}

/// Replaces `path` with `bytes`: temp file in the same directory, fsync,
/// rename over the original.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).fs_context(dir)?;
    tmp.write_all(bytes).fs_context(tmp.path())?;
    tmp.as_file().sync_all().fs_context(tmp.path())?;
    tmp.persist(path).map_err(|e| GlideError::FileSystem {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
