use std::path::{Path, PathBuf};

use envseal_crypto::CryptoError;
use envseal_keys::KeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{path}: {source}")]
    Crypto {
        path: PathBuf,
        #[source]
        source: CryptoError,
    },

    #[error("{path}: I/O error: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl BatchError {
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn crypto(path: &Path) -> impl FnOnce(CryptoError) -> Self + '_ {
        move |source| Self::Crypto {
            path: path.to_path_buf(),
            source,
        }
    }
}
