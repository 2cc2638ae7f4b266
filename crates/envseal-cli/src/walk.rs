//! Source-tree traversal and output path naming.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::BatchError;

/// Extension appended to encrypted files.
pub const ENCRYPTED_EXTENSION: &str = "enc";

/// Which files a walk selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Plaintext files whose extension is in the list. Already-encrypted
    /// files are never selected.
    Plaintext(Vec<String>),
    /// Files ending in `.enc`.
    Encrypted,
}

impl Selection {
    /// Normalize user-supplied extensions (`".go"` and `"go"` both work).
    pub fn plaintext<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Plaintext(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    pub fn matches(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str());
        match self {
            Selection::Encrypted => ext == Some(ENCRYPTED_EXTENSION),
            Selection::Plaintext(exts) => match ext {
                Some(ENCRYPTED_EXTENSION) | None => false,
                Some(ext) => exts.iter().any(|e| e == ext),
            },
        }
    }
}

/// Recursively collect regular files under `root` matching `selection`.
///
/// Symlinks are skipped. Unreadable subdirectories are logged and skipped;
/// only an unreadable root is an error. Results are sorted.
pub fn collect_files(root: &Path, selection: &Selection) -> Result<Vec<PathBuf>, BatchError> {
    let meta = fs::metadata(root).map_err(BatchError::io(root))?;
    if !meta.is_dir() {
        return Err(BatchError::InvalidRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(BatchError::io(root)(e.into())),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && selection.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `main.go` -> `main.go.enc`
pub fn encrypted_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ENCRYPTED_EXTENSION);
    PathBuf::from(name)
}

/// `main.go.enc` -> `main.go`
pub fn decrypted_path(path: &Path) -> PathBuf {
    path.with_extension("")
}
