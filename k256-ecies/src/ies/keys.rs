use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};

use super::{SealedMessage, crypto_box};
use crate::{AeadConfig, EciesError, PrivateKey, PublicKey};

/// Public key for sealing messages to a recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealingKey(PublicKey);

impl SealingKey {
    /// Wraps the recipient's public key.
    pub fn new(public_key: PublicKey) -> Self {
        Self(public_key)
    }

    /// Returns the recipient's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.0
    }

    /// Seals (encrypts and authenticates) `plaintext` for this recipient.
    ///
    /// # Errors
    /// - [EciesError::UnsupportedNonceLength] if `config` is not supported.
    /// - [EciesError::EntropyUnavailable] if `rng` fails.
    pub fn seal<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        config: &AeadConfig,
    ) -> Result<SealedMessage, EciesError> {
        crypto_box::seal(rng, &self.0, plaintext, config)
    }
}

impl From<PublicKey> for SealingKey {
    fn from(public_key: PublicKey) -> Self {
        Self(public_key)
    }
}

/// Private key for unsealing messages.
#[derive(Debug)]
pub struct UnsealingKey(PrivateKey);

impl UnsealingKey {
    /// Wraps the recipient's private key.
    pub fn new(private_key: PrivateKey) -> Self {
        Self(private_key)
    }

    /// Returns the [SealingKey] that seals messages for this key.
    pub fn sealing_key(&self) -> SealingKey {
        SealingKey(self.0.public_key().clone())
    }

    /// Unseals (verifies and decrypts) a message sealed for this key.
    ///
    /// # Errors
    /// - [EciesError::InvalidPublicKey] if the ephemeral key is not usable.
    /// - [EciesError::MessageTooShort] if the payload cannot hold a nonce and a tag.
    /// - [EciesError::DecryptionFailed] if the message fails authentication.
    pub fn unseal(
        &self,
        message: &SealedMessage,
        config: &AeadConfig,
    ) -> Result<Vec<u8>, EciesError> {
        crypto_box::unseal(&self.0, message, config)
    }
}

impl From<PrivateKey> for UnsealingKey {
    fn from(private_key: PrivateKey) -> Self {
        Self(private_key)
    }
}
