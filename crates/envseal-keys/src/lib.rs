//! RSA key handling for envseal.
//!
//! - PEM loading: PKIX `PUBLIC KEY` and PKCS#1 `RSA PRIVATE KEY`
//! - Key-pair generation and export (`private.pem` / `public.pem`)
//! - [`RecipientPublicKey`] / [`RecipientPrivateKey`], the RSA-OAEP(SHA-256)
//!   capabilities the envelope engine consumes

mod error;
mod keypair;
mod pem;
mod rsa_oaep;

pub use error::KeyError;
pub use keypair::{
    generate_keypair, private_key_pem, public_key_pem, write_keypair, DEFAULT_KEY_BITS,
    MIN_KEY_BITS, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};
pub use pem::{
    load_private_key, load_public_key, parse_private_key_pem, parse_public_key_pem,
    PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL,
};
pub use rsa_oaep::{max_oaep_message_len, RecipientPrivateKey, RecipientPublicKey};

#[cfg(test)]
mod test_keys {
    use std::sync::OnceLock;

    use crate::keypair::generate_keypair;
    use crate::rsa_oaep::RecipientPrivateKey;

    static PRIMARY: OnceLock<RecipientPrivateKey> = OnceLock::new();
    static SECONDARY: OnceLock<RecipientPrivateKey> = OnceLock::new();

    /// Shared 2048-bit key; generation is too slow to repeat per test.
    pub fn primary() -> &'static RecipientPrivateKey {
        PRIMARY.get_or_init(|| generate_keypair(2048).unwrap())
    }

    pub fn secondary() -> &'static RecipientPrivateKey {
        SECONDARY.get_or_init(|| generate_keypair(2048).unwrap())
    }
}
