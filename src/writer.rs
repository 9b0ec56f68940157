//! Atomic file writer
//!
//! Content goes to a temporary file next to the destination which is then
//! renamed over it, so a failed run never leaves a truncated build file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{GenError, GenResult};

/// Write `content` to `path`, replacing whatever was there.
pub fn atomic_write(path: &Path, content: &[u8]) -> GenResult<()> {
    let write_err = |source: std::io::Error| GenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
