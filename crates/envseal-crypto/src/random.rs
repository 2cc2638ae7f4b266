//! Randomness for per-call key and nonce material.
//!
//! Every encryption draws a fresh 256-bit key and an independent 96-bit
//! nonce. A source that cannot deliver is a hard error; there is no
//! fallback generator.

use crate::error::CryptoError;
use crate::types::{SymmetricKey, NONCE_LENGTH, SYMMETRIC_KEY_LENGTH};

/// A cryptographically secure byte source.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely or fail with `RandomnessUnavailable`.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating system CSPRNG via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::getrandom(dest).map_err(|e| CryptoError::RandomnessUnavailable(e.to_string()))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill_bytes(dest)
    }
}

/// Generate a random 256-bit symmetric key.
pub fn generate_key(rng: &impl RandomSource) -> Result<SymmetricKey, CryptoError> {
    let mut bytes = [0u8; SYMMETRIC_KEY_LENGTH];
    rng.fill_bytes(&mut bytes)?;
    let key = SymmetricKey::from_bytes(bytes);
    zeroize::Zeroize::zeroize(&mut bytes);
    Ok(key)
}

/// Generate a random 12-byte AES-GCM nonce.
pub fn generate_nonce(rng: &impl RandomSource) -> Result<[u8; NONCE_LENGTH], CryptoError> {
    let mut nonce = [0u8; NONCE_LENGTH];
    rng.fill_bytes(&mut nonce)?;
    Ok(nonce)
}
