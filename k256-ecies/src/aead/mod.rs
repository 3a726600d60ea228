//! Data encapsulation: authenticated symmetric encryption of the payload.
//!
//! Sealed messages are laid out as `nonce || tag || ciphertext`, with the 16-byte tag placed
//! before the ciphertext. No associated data is used.

use alloc::vec::Vec;
use core::fmt;

use aes_gcm::{
    AesGcm,
    aead::{AeadInPlace, KeyInit, Nonce, consts},
    aes::Aes256,
};
use chacha20poly1305::XChaCha20Poly1305;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

use crate::EciesError;

mod config;
pub use config::{AeadConfig, SymmetricAlgorithm};

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

/// Length of the authentication tag for every supported cipher.
pub const TAG_BYTES: usize = 16;

/// Length of the symmetric key for every supported cipher.
pub const KEY_BYTES: usize = 32;

/// Nonce length of XChaCha20-Poly1305.
pub const XCHACHA20_NONCE_BYTES: usize = 24;

/// Nonce length used for AES-256-GCM unless configured otherwise.
pub const DEFAULT_AES_GCM_NONCE_BYTES: usize = 16;

/// Shortest nonce accepted for AES-256-GCM.
pub const MIN_AES_GCM_NONCE_BYTES: usize = 1;

/// Longest nonce accepted for AES-256-GCM.
pub const MAX_AES_GCM_NONCE_BYTES: usize = 32;

const MAX_NONCE_BYTES: usize = MAX_AES_GCM_NONCE_BYTES;

// SYMMETRIC CIPHER
// ================================================================================================

/// An AEAD cipher keyed for sealing and opening messages.
pub struct SymmetricCipher {
    config: AeadConfig,
    inner: CipherInner,
}

enum CipherInner {
    Aes256Gcm(AesGcmCipher),
    XChaCha20(XChaCha20Poly1305),
}

impl SymmetricCipher {
    /// Builds a cipher from a 32-byte key and a configuration.
    ///
    /// # Errors
    /// - [EciesError::UnsupportedNonceLength] if the configuration is not supported.
    /// - [EciesError::InvalidKeyLength] if `key` is not [KEY_BYTES] long.
    pub fn new(key: &[u8], config: &AeadConfig) -> Result<Self, EciesError> {
        config.validate()?;
        if key.len() != KEY_BYTES {
            return Err(EciesError::InvalidKeyLength { expected: KEY_BYTES, actual: key.len() });
        }

        let inner = match config.algorithm() {
            SymmetricAlgorithm::Aes256Gcm => {
                CipherInner::Aes256Gcm(AesGcmCipher::new(key, config.nonce_len())?)
            },
            SymmetricAlgorithm::XChaCha20Poly1305 => CipherInner::XChaCha20(new_cipher(key)?),
        };

        Ok(Self { config: *config, inner })
    }

    /// Returns the configuration this cipher was built with.
    pub fn config(&self) -> &AeadConfig {
        &self.config
    }

    /// Encrypts `plaintext` under a fresh random nonce and returns `nonce || tag || ciphertext`.
    pub fn seal<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EciesError> {
        let mut nonce = [0u8; MAX_NONCE_BYTES];
        let nonce = &mut nonce[..self.config.nonce_len()];
        rng.try_fill_bytes(nonce)?;

        self.seal_with_nonce(nonce, plaintext)
    }

    /// Encrypts `plaintext` under the given nonce.
    ///
    /// The caller must never reuse a nonce with the same key.
    pub(crate) fn seal_with_nonce(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EciesError> {
        debug_assert_eq!(nonce.len(), self.config.nonce_len());

        match &self.inner {
            CipherInner::Aes256Gcm(cipher) => cipher.seal(nonce, plaintext),
            CipherInner::XChaCha20(cipher) => encrypt_detached(cipher, nonce, plaintext),
        }
    }

    /// Verifies and decrypts a message produced by [Self::seal].
    ///
    /// # Errors
    /// - [EciesError::MessageTooShort] if `message` cannot hold a nonce and a tag.
    /// - [EciesError::DecryptionFailed] if authentication fails, whichever part was altered.
    pub fn open(&self, message: &[u8]) -> Result<Vec<u8>, EciesError> {
        let nonce_len = self.config.nonce_len();
        let min = nonce_len + TAG_BYTES;
        if message.len() < min {
            debug!(
                target: "k256_ecies::aead",
                len = message.len(),
                min,
                "sealed message too short"
            );
            return Err(EciesError::MessageTooShort { min, actual: message.len() });
        }

        let (nonce, rest) = message.split_at(nonce_len);
        let (tag, ciphertext) = rest.split_at(TAG_BYTES);

        let result = match &self.inner {
            CipherInner::Aes256Gcm(cipher) => cipher.open(nonce, tag, ciphertext),
            CipherInner::XChaCha20(cipher) => decrypt(cipher, nonce, tag, ciphertext),
        };
        result.inspect_err(|_| {
            debug!(
                target: "k256_ecies::aead",
                algorithm = %self.config.algorithm(),
                "message authentication failed"
            );
        })
    }
}

impl fmt::Debug for SymmetricCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricCipher")
            .field("algorithm", &self.config.algorithm())
            .field("nonce_len", &self.config.nonce_len())
            .finish_non_exhaustive()
    }
}

// AES-GCM NONCE SIZES
// ================================================================================================

/// Generates one AES-256-GCM instance per supported nonce length; the length is a type parameter
/// of [AesGcm], so the choice is made once when the cipher is built.
macro_rules! aes_gcm_nonce_sizes {
    ($($size:ident => $len:literal),* $(,)?) => {
        enum AesGcmCipher {
            $($size(AesGcm<Aes256, consts::$size>),)*
        }

        impl AesGcmCipher {
            fn new(key: &[u8], nonce_len: usize) -> Result<Self, EciesError> {
                match nonce_len {
                    $($len => Ok(Self::$size(new_cipher(key)?)),)*
                    _ => Err(EciesError::UnsupportedNonceLength(nonce_len)),
                }
            }

            fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, EciesError> {
                match self {
                    $(Self::$size(cipher) => encrypt_detached(cipher, nonce, plaintext),)*
                }
            }

            fn open(
                &self,
                nonce: &[u8],
                tag: &[u8],
                ciphertext: &[u8],
            ) -> Result<Vec<u8>, EciesError> {
                match self {
                    $(Self::$size(cipher) => decrypt(cipher, nonce, tag, ciphertext),)*
                }
            }
        }
    };
}

aes_gcm_nonce_sizes! {
    U1 => 1, U2 => 2, U3 => 3, U4 => 4, U5 => 5, U6 => 6, U7 => 7, U8 => 8,
    U9 => 9, U10 => 10, U11 => 11, U12 => 12, U13 => 13, U14 => 14, U15 => 15, U16 => 16,
    U17 => 17, U18 => 18, U19 => 19, U20 => 20, U21 => 21, U22 => 22, U23 => 23, U24 => 24,
    U25 => 25, U26 => 26, U27 => 27, U28 => 28, U29 => 29, U30 => 30, U31 => 31, U32 => 32,
}

// CONVENIENCE FUNCTIONS
// ================================================================================================

/// Seals `plaintext` under `key` with a nonce drawn from the OS random number generator.
#[cfg(feature = "std")]
pub fn seal(key: &[u8], plaintext: &[u8], config: &AeadConfig) -> Result<Vec<u8>, EciesError> {
    SymmetricCipher::new(key, config)?.seal(&mut rand_core::OsRng, plaintext)
}

/// Opens a message produced by [seal].
#[cfg(feature = "std")]
pub fn open(key: &[u8], message: &[u8], config: &AeadConfig) -> Result<Vec<u8>, EciesError> {
    SymmetricCipher::new(key, config)?.open(message)
}

// HELPERS
// ================================================================================================

fn new_cipher<C: KeyInit>(key: &[u8]) -> Result<C, EciesError> {
    C::new_from_slice(key)
        .map_err(|_| EciesError::InvalidKeyLength { expected: KEY_BYTES, actual: key.len() })
}

fn encrypt_detached<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, EciesError> {
    let header_len = nonce.len() + TAG_BYTES;

    let mut message = Vec::with_capacity(header_len + plaintext.len());
    message.extend_from_slice(nonce);
    message.resize(header_len, 0);
    message.extend_from_slice(plaintext);

    let tag = cipher
        .encrypt_in_place_detached(Nonce::<C>::from_slice(nonce), &[], &mut message[header_len..])
        .map_err(|_| EciesError::EncryptionFailed)?;
    message[nonce.len()..header_len].copy_from_slice(&tag);

    Ok(message)
}

fn decrypt<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    tag: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EciesError> {
    let mut buffer = Vec::with_capacity(ciphertext.len() + tag.len());
    buffer.extend_from_slice(ciphertext);
    buffer.extend_from_slice(tag);

    cipher
        .decrypt_in_place(Nonce::<C>::from_slice(nonce), &[], &mut buffer)
        .map_err(|_| EciesError::DecryptionFailed)?;

    Ok(buffer)
}
