//! RSA key-pair generation and PEM export.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use tracing::info;
use zeroize::Zeroizing;

use crate::error::KeyError;
use crate::rsa_oaep::{RecipientPrivateKey, RecipientPublicKey};

pub const DEFAULT_KEY_BITS: usize = 2048;
pub const MIN_KEY_BITS: usize = 2048;

pub const PRIVATE_KEY_FILE: &str = "private.pem";
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// Generate a fresh RSA private key of `bits` size.
pub fn generate_keypair(bits: usize) -> Result<RecipientPrivateKey, KeyError> {
    if bits < MIN_KEY_BITS {
        return Err(KeyError::KeyTooSmall {
            bits,
            min: MIN_KEY_BITS,
        });
    }
    let key = RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| KeyError::Generation(e.to_string()))?;
    Ok(RecipientPrivateKey::new(key))
}

/// Encode a public key as a PKIX `PUBLIC KEY` PEM document.
pub fn public_key_pem(key: &RecipientPublicKey) -> Result<String, KeyError> {
    key.as_rsa()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyError::Encode(e.to_string()))
}

/// Encode a private key as a PKCS#1 `RSA PRIVATE KEY` PEM document.
pub fn private_key_pem(key: &RecipientPrivateKey) -> Result<Zeroizing<String>, KeyError> {
    key.as_rsa()
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| KeyError::Encode(e.to_string()))
}

fn write_new(path: &Path, contents: &[u8], private: bool) -> Result<(), KeyError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    if private {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = private;

    let mut file = options.open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            KeyError::AlreadyExists(path.to_path_buf())
        } else {
            KeyError::Write {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|source| KeyError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `private.pem` and `public.pem` into `dir`.
///
/// Existing files are never overwritten. Returns `(private, public)` paths.
pub fn write_keypair(
    key: &RecipientPrivateKey,
    dir: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf), KeyError> {
    let dir = dir.as_ref();
    let private_path = dir.join(PRIVATE_KEY_FILE);
    let public_path = dir.join(PUBLIC_KEY_FILE);

    for path in [&private_path, &public_path] {
        if path.exists() {
            return Err(KeyError::AlreadyExists(path.clone()));
        }
    }

    let private_pem = private_key_pem(key)?;
    let public_pem = public_key_pem(&key.public_key())?;
    write_new(&private_path, private_pem.as_bytes(), true)?;
    write_new(&public_path, public_pem.as_bytes(), false)?;

    info!(
        private = %private_path.display(),
        public = %public_path.display(),
        bits = key.bits(),
        "generated RSA key pair"
    );
    Ok((private_path, public_path))
}
