//! Integrated Encryption Scheme (IES) over secp256k1.
//!
//! Sealing generates an ephemeral key pair, derives a symmetric key with the recipient's public
//! key through [PrivateKey::encapsulate](crate::PrivateKey::encapsulate) and encrypts the payload
//! with the configured AEAD cipher. The sealed message carries the ephemeral public key in front
//! of the AEAD output:
//!
//! ```text
//! ephemeral public key (65 bytes, uncompressed) || nonce || tag || ciphertext
//! ```
//!
//! # Examples
//!
//! ```
//! use k256_ecies::{
//!     AeadConfig, PrivateKey,
//!     ies::{SealedMessage, SealingKey, UnsealingKey},
//! };
//! use rand_core::OsRng;
//!
//! let config = AeadConfig::default();
//! let secret_key = PrivateKey::with_rng(&mut OsRng).unwrap();
//!
//! let sealing_key = SealingKey::new(secret_key.public_key().clone());
//! let unsealing_key = UnsealingKey::new(secret_key);
//!
//! let sealed = sealing_key.seal(&mut OsRng, b"hello world", &config).unwrap();
//! let bytes = sealed.to_bytes();
//!
//! let received = SealedMessage::from_bytes(&bytes).unwrap();
//! let opened = unsealing_key.unseal(&received, &config).unwrap();
//!
//! assert_eq!(opened.as_slice(), b"hello world");
//! ```

mod crypto_box;
mod keys;
mod message;


#[cfg(feature = "std")]
use alloc::vec::Vec;

pub use keys::{SealingKey, UnsealingKey};
pub use message::SealedMessage;

#[cfg(feature = "std")]
use crate::{AeadConfig, EciesError, PrivateKey, PublicKey};

// CONVENIENCE FUNCTIONS
// ================================================================================================

/// Encrypts `plaintext` to `recipient` and returns the serialized sealed message.
///
/// Uses the OS random number generator for the ephemeral key and the nonce.
#[cfg(feature = "std")]
pub fn encrypt(
    recipient: &PublicKey,
    plaintext: &[u8],
    config: &AeadConfig,
) -> Result<Vec<u8>, EciesError> {
    let sealed = crypto_box::seal(&mut rand_core::OsRng, recipient, plaintext, config)?;
    Ok(sealed.to_bytes())
}

/// Decrypts a serialized sealed message produced by [encrypt].
#[cfg(feature = "std")]
pub fn decrypt(
    recipient: &PrivateKey,
    message: &[u8],
    config: &AeadConfig,
) -> Result<Vec<u8>, EciesError> {
    let sealed = SealedMessage::from_bytes(message)?;
    crypto_box::unseal(recipient, &sealed, config)
}
