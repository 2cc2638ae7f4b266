//! Crash-safe replacement of a source file by its transformed output.
//!
//! Sequence: temp file in the target directory, fsync, rename over the
//! target, fsync the directory, and only then remove the source. A crash at
//! any point leaves at least one complete copy on disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::BatchError;

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), BatchError> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(BatchError::io(dir))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), BatchError> {
    Ok(())
}

/// Atomically write `contents` to `target`, carrying over `source`'s
/// permissions. `target` is replaced if it exists.
pub fn write_atomic(source: &Path, target: &Path, contents: &[u8]) -> Result<(), BatchError> {
    let dir = parent_dir(target);
    let mut tmp = NamedTempFile::new_in(dir).map_err(BatchError::io(dir))?;
    tmp.write_all(contents).map_err(BatchError::io(tmp.path()))?;
    tmp.as_file().sync_all().map_err(BatchError::io(tmp.path()))?;

    let permissions = fs::metadata(source)
        .map_err(BatchError::io(source))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(BatchError::io(tmp.path()))?;

    tmp.persist(target).map_err(|e| BatchError::Io {
        path: target.to_path_buf(),
        source: e.error,
    })?;
    sync_dir(dir)
}

/// Write the output atomically, then delete the source.
pub fn replace_file(source: &Path, target: &Path, contents: &[u8]) -> Result<(), BatchError> {
    write_atomic(source, target, contents)?;
    fs::remove_file(source).map_err(BatchError::io(source))?;
    sync_dir(parent_dir(source))
}
