//! Envelope encryption engine.
//!
//! A packet carries everything needed to decrypt it except the private key:
//! an RSA-OAEP(SHA-256) encrypted AES-256 key, the GCM nonce, and the
//! AES-256-GCM ciphertext with its tag.
//!
//! Wire format: `[keyBlobLen:4 BE][key blob][nonce:12][ciphertext][tag:16]`
//!
//! Keys are supplied as capabilities ([`KeyEncryptor`] / [`KeyDecryptor`]);
//! this crate never parses key files or touches the filesystem.

pub mod aead;
pub mod capability;
pub mod envelope;
pub mod error;
pub mod packet;
pub mod random;
pub mod types;

pub use aead::PayloadCipher;
pub use capability::{KeyDecryptor, KeyEncryptor};
pub use envelope::{decrypt, encrypt, EnvelopeDecryptor, EnvelopeEncryptor};
pub use error::CryptoError;
pub use packet::Packet;
pub use random::{generate_key, generate_nonce, OsRandom, RandomSource};
pub use types::{
    SymmetricKey, KEY_BLOB_LENGTH_PREFIX, NONCE_LENGTH, SYMMETRIC_KEY_LENGTH, TAG_LENGTH,
};
