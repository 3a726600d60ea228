use alloc::vec::Vec;

use crate::{EciesError, PublicKey, keys::UNCOMPRESSED_PUBLIC_KEY_BYTES};

/// A sealed message: the sender's ephemeral public key and the AEAD output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    ephemeral_key: PublicKey,
    /// `nonce || tag || ciphertext`
    payload: Vec<u8>,
}

impl SealedMessage {
    pub(crate) fn new(ephemeral_key: PublicKey, payload: Vec<u8>) -> Self {
        Self { ephemeral_key, payload }
    }

    /// Returns the sender's ephemeral public key.
    pub fn ephemeral_key(&self) -> &PublicKey {
        &self.ephemeral_key
    }

    /// Returns the AEAD output, laid out as `nonce || tag || ciphertext`.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serializes the message as the uncompressed ephemeral key followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(UNCOMPRESSED_PUBLIC_KEY_BYTES + self.payload.len());
        out.extend_from_slice(&self.ephemeral_key.to_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parses a message produced by [Self::to_bytes].
    ///
    /// The payload is not checked here; a payload too short for the configured cipher is
    /// reported when the message is unsealed.
    ///
    /// # Errors
    /// - [EciesError::MessageTooShort] if `bytes` cannot hold an ephemeral public key.
    /// - [EciesError::MalformedPublicKey] if the ephemeral public key does not decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EciesError> {
        if bytes.len() < UNCOMPRESSED_PUBLIC_KEY_BYTES {
            return Err(EciesError::MessageTooShort {
                min: UNCOMPRESSED_PUBLIC_KEY_BYTES,
                actual: bytes.len(),
            });
        }
        let (key, payload) = bytes.split_at(UNCOMPRESSED_PUBLIC_KEY_BYTES);

        Ok(Self::new(PublicKey::from_bytes(key)?, payload.to_vec()))
    }
}
