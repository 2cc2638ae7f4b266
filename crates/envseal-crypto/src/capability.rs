//! Asymmetric key capabilities.
//!
//! The engine never sees key encodings. Whoever owns the RSA keys hands in
//! something that can OAEP-encrypt (public side) or OAEP-decrypt (private
//! side) a 32-byte symmetric key.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::error::CryptoError;

/// RSA-OAEP(SHA-256) encryption under a recipient public key.
pub trait KeyEncryptor: Send + Sync {
    /// Encrypt `key`, returning the key blob. Must fail with
    /// `AsymmetricEncrypt` if `key` does not fit the modulus.
    fn encrypt_key(&self, key: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// RSA-OAEP(SHA-256) decryption with a private key.
pub trait KeyDecryptor: Send + Sync {
    /// Recover key material from a key blob.
    fn decrypt_key(&self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError>;
}

impl<T: KeyEncryptor + ?Sized> KeyEncryptor for &T {
    fn encrypt_key(&self, key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).encrypt_key(key)
    }
}

impl<T: KeyEncryptor + ?Sized> KeyEncryptor for Arc<T> {
    fn encrypt_key(&self, key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).encrypt_key(key)
    }
}

impl<T: KeyDecryptor + ?Sized> KeyDecryptor for &T {
    fn decrypt_key(&self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        (**self).decrypt_key(blob)
    }
}

impl<T: KeyDecryptor + ?Sized> KeyDecryptor for Arc<T> {
    fn decrypt_key(&self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        (**self).decrypt_key(blob)
    }
}
