//! Packet wire format.
//!
//! `[keyBlobLen:4 BE][key blob:keyBlobLen][nonce:12][ciphertext + tag]`
//!
//! No version byte, no compression. The declared length is the only
//! authority for where the key blob ends.

use crate::error::CryptoError;
use crate::types::{KEY_BLOB_LENGTH_PREFIX, NONCE_LENGTH};

/// A packet's three fields, borrowed from the buffers that hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    pub key_blob: &'a [u8],
    pub nonce: &'a [u8; NONCE_LENGTH],
    pub ciphertext: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Total serialized size.
    pub fn encoded_len(&self) -> usize {
        KEY_BLOB_LENGTH_PREFIX + self.key_blob.len() + NONCE_LENGTH + self.ciphertext.len()
    }

    /// Serialize into a freshly allocated buffer.
    ///
    /// A key blob too long for the length prefix means the key capability
    /// produced something unusable, so it is an `AsymmetricEncrypt` error.
    pub fn encode(&self) -> Result<Vec<u8>, CryptoError> {
        let prefix = length_prefix(self.key_blob.len())?;

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&prefix);
        out.extend_from_slice(self.key_blob);
        out.extend_from_slice(self.nonce);
        out.extend_from_slice(self.ciphertext);
        Ok(out)
    }

    /// Split a serialized packet into its fields without copying.
    ///
    /// All three framing boundaries are checked here, so a truncated packet
    /// is rejected before any key material is touched.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CryptoError> {
        if bytes.len() < KEY_BLOB_LENGTH_PREFIX {
            return Err(CryptoError::MalformedPacket(format!(
                "packet too short for key blob length: {} bytes",
                bytes.len()
            )));
        }
        let (prefix, rest) = bytes.split_at(KEY_BLOB_LENGTH_PREFIX);
        let mut len_bytes = [0u8; KEY_BLOB_LENGTH_PREFIX];
        len_bytes.copy_from_slice(prefix);
        let declared = u32::from_be_bytes(len_bytes) as usize;

        if rest.len() < declared {
            return Err(CryptoError::MalformedPacket(format!(
                "key blob truncated: declared {} bytes, {} available",
                declared,
                rest.len()
            )));
        }
        let (key_blob, rest) = rest.split_at(declared);

        if rest.len() < NONCE_LENGTH {
            return Err(CryptoError::MalformedPacket(format!(
                "nonce truncated: {} of {} bytes",
                rest.len(),
                NONCE_LENGTH
            )));
        }
        let (nonce, ciphertext) = rest.split_at(NONCE_LENGTH);
        let nonce: &[u8; NONCE_LENGTH] = nonce
            .try_into()
            .map_err(|_| CryptoError::MalformedPacket("invalid nonce".into()))?;

        Ok(Self {
            key_blob,
            nonce,
            ciphertext,
        })
    }
}

fn length_prefix(blob_len: usize) -> Result<[u8; KEY_BLOB_LENGTH_PREFIX], CryptoError> {
    u32::try_from(blob_len)
        .map(u32::to_be_bytes)
        .map_err(|_| {
            CryptoError::AsymmetricEncrypt(format!(
                "key blob of {} bytes does not fit a u32 length prefix",
                blob_len
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: [u8; NONCE_LENGTH] = [9u8; NONCE_LENGTH];

    fn sample() -> Vec<u8> {
        Packet {
            key_blob: &[0xAA; 256],
            nonce: &NONCE,
            ciphertext: &[0x55; 40],
        }
        .encode()
        .unwrap()
    }

    #[test]
    fn layout_matches_wire_format() {
        let bytes = sample();
        assert_eq!(bytes.len(), 4 + 256 + 12 + 40);
        assert_eq!(&bytes[..4], &[0x00, 0x00, 0x01, 0x00]);
        assert!(bytes[4..260].iter().all(|&b| b == 0xAA));
        assert_eq!(&bytes[260..272], &NONCE);
        assert!(bytes[272..].iter().all(|&b| b == 0x55));
    }

    #[test]
    fn parse_recovers_fields() {
        let bytes = sample();
        let packet = Packet::parse(&bytes).unwrap();
        assert_eq!(packet.key_blob.len(), 256);
        assert_eq!(packet.nonce, &NONCE);
        assert_eq!(packet.ciphertext, &[0x55; 40][..]);
        assert_eq!(packet.encoded_len(), bytes.len());
    }

    #[test]
    fn empty_ciphertext_is_allowed_by_framing() {
        let bytes = Packet {
            key_blob: &[1, 2, 3],
            nonce: &NONCE,
            ciphertext: &[],
        }
        .encode()
        .unwrap();
        let packet = Packet::parse(&bytes).unwrap();
        assert!(packet.ciphertext.is_empty());
        assert_eq!(packet.key_blob, &[1, 2, 3]);
    }

    #[test]
    fn zero_length_key_blob_parses() {
        let mut bytes = vec![0, 0, 0, 0];
        bytes.extend_from_slice(&NONCE);
        let packet = Packet::parse(&bytes).unwrap();
        assert!(packet.key_blob.is_empty());
        assert!(packet.ciphertext.is_empty());
    }

    #[test]
    fn truncated_length_prefix() {
        for len in 0..KEY_BLOB_LENGTH_PREFIX {
            let err = Packet::parse(&sample()[..len]).unwrap_err();
            assert!(matches!(err, CryptoError::MalformedPacket(_)));
        }
    }

    #[test]
    fn truncated_key_blob() {
        let bytes = sample();
        for len in [4, 5, 100, 259] {
            let err = Packet::parse(&bytes[..len]).unwrap_err();
            assert!(err.to_string().contains("key blob truncated"));
        }
    }

    #[test]
    fn truncated_nonce() {
        let bytes = sample();
        for len in [260, 265, 271] {
            let err = Packet::parse(&bytes[..len]).unwrap_err();
            assert!(err.to_string().contains("nonce truncated"));
        }
    }

    #[test]
    fn oversized_declared_length() {
        let mut bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            Packet::parse(&bytes),
            Err(CryptoError::MalformedPacket(_))
        ));
    }

    #[test]
    fn length_prefix_is_big_endian() {
        assert_eq!(length_prefix(256).unwrap(), [0x00, 0x00, 0x01, 0x00]);
        assert_eq!(length_prefix(u32::MAX as usize).unwrap(), [0xFF; 4]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_key_blob_is_an_encrypt_side_error() {
        let err = length_prefix(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, CryptoError::AsymmetricEncrypt(_)));
    }
}
