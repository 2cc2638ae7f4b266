use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite existing key file {0}")]
    AlreadyExists(PathBuf),

    #[error("Not a PEM document")]
    NotPem,

    #[error("Wrong PEM block: expected \"{expected}\", got \"{found}\"")]
    WrongPemType {
        expected: &'static str,
        found: String,
    },

    #[error("Invalid key encoding: {0}")]
    Decode(String),

    #[error("Key encoding failed: {0}")]
    Encode(String),

    #[error("Key generation failed: {0}")]
    Generation(String),

    #[error("RSA key too small: {bits} bits (minimum {min})")]
    KeyTooSmall { bits: usize, min: usize },
}
