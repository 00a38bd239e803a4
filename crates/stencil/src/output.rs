//! Writing rendered pages to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::BuildError;

/// Writes `content` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the same directory first and is
/// then renamed over `path`, so a failed write never leaves a truncated page.
/// Returns the number of bytes written.
pub fn write_output(path: &Path, content: &str) -> Result<usize, BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    Ok(content.len())
}
