//! Hybrid envelope encryption.
//!
//! Each call draws a fresh AES-256 key and nonce, seals the payload with
//! AES-256-GCM, and encrypts the key under the recipient's RSA key. The
//! result is a self-contained packet (see [`crate::packet`]).

use tracing::debug;

use crate::aead::PayloadCipher;
use crate::capability::{KeyDecryptor, KeyEncryptor};
use crate::error::CryptoError;
use crate::packet::Packet;
use crate::random::{generate_key, generate_nonce, OsRandom, RandomSource};
use crate::types::SymmetricKey;

/// Produces packets for one recipient public key.
pub struct EnvelopeEncryptor<K, R = OsRandom> {
    recipient: K,
    rng: R,
}

impl<K: KeyEncryptor> EnvelopeEncryptor<K, OsRandom> {
    pub fn new(recipient: K) -> Self {
        Self {
            recipient,
            rng: OsRandom,
        }
    }
}

impl<K: KeyEncryptor, R: RandomSource> EnvelopeEncryptor<K, R> {
    /// Use a specific randomness source instead of the OS CSPRNG.
    pub fn with_random_source(recipient: K, rng: R) -> Self {
        Self { recipient, rng }
    }

    /// Encrypt `plaintext` into a packet.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.encrypt_with_aad(plaintext, &[])
    }

    /// Encrypt `plaintext`, binding `aad` into the authentication tag.
    ///
    /// `aad` is not stored in the packet; the same bytes must be supplied to
    /// [`EnvelopeDecryptor::decrypt_with_aad`].
    pub fn encrypt_with_aad(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = generate_key(&self.rng)?;
        let cipher = PayloadCipher::new(&key)?;
        let nonce = generate_nonce(&self.rng)?;

        let ciphertext = cipher.seal(&nonce, plaintext, aad)?;
        let key_blob = self.recipient.encrypt_key(key.as_bytes())?;
        drop(key);

        let packet = Packet {
            key_blob: &key_blob,
            nonce: &nonce,
            ciphertext: &ciphertext,
        }
        .encode()?;

        debug!(
            plaintext_len = plaintext.len(),
            key_blob_len = key_blob.len(),
            packet_len = packet.len(),
            "sealed envelope"
        );
        Ok(packet)
    }
}

/// Opens packets with one private key.
pub struct EnvelopeDecryptor<K> {
    key: K,
}

impl<K: KeyDecryptor> EnvelopeDecryptor<K> {
    pub fn new(key: K) -> Self {
        Self { key }
    }

    /// Decrypt a packet, returning the original plaintext.
    pub fn decrypt(&self, packet: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.decrypt_with_aad(packet, &[])
    }

    /// Decrypt a packet sealed with [`EnvelopeEncryptor::encrypt_with_aad`].
    pub fn decrypt_with_aad(&self, packet: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let parsed = Packet::parse(packet)?;

        let key = self.recover_key(parsed.key_blob)?;
        let cipher = PayloadCipher::new(&key)?;
        drop(key);

        let plaintext = cipher.open(parsed.nonce, parsed.ciphertext, aad)?;

        debug!(
            packet_len = packet.len(),
            plaintext_len = plaintext.len(),
            "opened envelope"
        );
        Ok(plaintext)
    }

    /// Every failure in here collapses to `KeyRecoveryFailed`.
    fn recover_key(&self, blob: &[u8]) -> Result<SymmetricKey, CryptoError> {
        let raw = self
            .key
            .decrypt_key(blob)
            .map_err(|_| CryptoError::KeyRecoveryFailed)?;
        SymmetricKey::from_slice(&raw).map_err(|_| CryptoError::KeyRecoveryFailed)
    }
}

/// One-shot [`EnvelopeEncryptor::encrypt`] with the OS CSPRNG.
pub fn encrypt(plaintext: &[u8], recipient: &impl KeyEncryptor) -> Result<Vec<u8>, CryptoError> {
    EnvelopeEncryptor::new(recipient).encrypt(plaintext)
}

/// One-shot [`EnvelopeDecryptor::decrypt`].
pub fn decrypt(packet: &[u8], key: &impl KeyDecryptor) -> Result<Vec<u8>, CryptoError> {
    EnvelopeDecryptor::new(key).decrypt(packet)
}
