use thiserror::Error;

/// Failures surfaced by the envelope engine.
///
/// `KeyRecoveryFailed` and `AuthenticationFailure` deliberately carry no
/// detail: the caller learns which stage rejected the packet, nothing more.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Random number generation failed: {0}")]
    RandomnessUnavailable(String),

    #[error("Asymmetric key encryption failed: {0}")]
    AsymmetricEncrypt(String),

    #[error("Key recovery failed")]
    KeyRecoveryFailed,

    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Authentication failed")]
    AuthenticationFailure,

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Symmetric encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
