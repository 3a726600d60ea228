//! Composition of the KEM and the AEAD framing into a sealed box.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};
use tracing::debug;

use super::SealedMessage;
use crate::{AeadConfig, EciesError, PrivateKey, PublicKey, SymmetricCipher};

/// Seals `plaintext` to `recipient` under a fresh ephemeral key pair.
pub(crate) fn seal<R: CryptoRng + RngCore>(
    rng: &mut R,
    recipient: &PublicKey,
    plaintext: &[u8],
    config: &AeadConfig,
) -> Result<SealedMessage, EciesError> {
    config.validate()?;

    let ephemeral = PrivateKey::with_rng(rng)?;
    let key = ephemeral.encapsulate(recipient)?;
    let payload = SymmetricCipher::new(key.as_ref(), config)?.seal(rng, plaintext)?;

    Ok(SealedMessage::new(ephemeral.public_key().clone(), payload))
}

/// Recovers the plaintext of `message` with the recipient's private key.
pub(crate) fn unseal(
    recipient: &PrivateKey,
    message: &SealedMessage,
    config: &AeadConfig,
) -> Result<Vec<u8>, EciesError> {
    let result = recipient.decapsulate(message.ephemeral_key()).and_then(|key| {
        SymmetricCipher::new(key.as_ref(), config)?.open(message.payload())
    });

    result.inspect_err(|err| {
        debug!(target: "k256_ecies::ies", kind = ?err.kind(), "cannot unseal message");
    })
}
