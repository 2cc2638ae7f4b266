//! RSA-OAEP(SHA-256) key capabilities.
//!
//! OAEP uses SHA-256 for both the label hash and MGF1, with an empty label.

use envseal_crypto::{CryptoError, KeyDecryptor, KeyEncryptor};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

/// SHA-256 digest length; OAEP overhead is `2 * hLen + 2`.
const OAEP_SHA256_HASH_LEN: usize = 32;

/// Largest message OAEP-SHA256 can carry under a modulus of `modulus_len` bytes.
pub fn max_oaep_message_len(modulus_len: usize) -> usize {
    modulus_len.saturating_sub(2 * OAEP_SHA256_HASH_LEN + 2)
}

/// Recipient public key. Anyone holding it can produce packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientPublicKey(RsaPublicKey);

impl RecipientPublicKey {
    pub fn new(key: RsaPublicKey) -> Self {
        Self(key)
    }

    /// Modulus size in bytes; also the length of every key blob.
    pub fn modulus_len(&self) -> usize {
        self.0.size()
    }

    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    pub fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl KeyEncryptor for RecipientPublicKey {
    fn encrypt_key(&self, key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let max = max_oaep_message_len(self.modulus_len());
        if key.len() > max {
            return Err(CryptoError::AsymmetricEncrypt(format!(
                "{} byte key exceeds OAEP-SHA256 capacity of {} bytes for a {}-bit modulus",
                key.len(),
                max,
                self.bits()
            )));
        }
        self.0
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key)
            .map_err(|e| CryptoError::AsymmetricEncrypt(e.to_string()))
    }
}

/// Recipient private key.
#[derive(Clone)]
pub struct RecipientPrivateKey(RsaPrivateKey);

impl RecipientPrivateKey {
    pub fn new(key: RsaPrivateKey) -> Self {
        Self(key)
    }

    pub fn public_key(&self) -> RecipientPublicKey {
        RecipientPublicKey(self.0.to_public_key())
    }

    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl std::fmt::Debug for RecipientPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipientPrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

impl KeyDecryptor for RecipientPrivateKey {
    fn decrypt_key(&self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        // The underlying error is dropped: padding and length failures must
        // look identical to the caller.
        self.0
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), blob)
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::KeyRecoveryFailed)
    }
}
