use alloc::string::ToString;
use core::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    DEFAULT_AES_GCM_NONCE_BYTES, MAX_AES_GCM_NONCE_BYTES, MIN_AES_GCM_NONCE_BYTES,
    XCHACHA20_NONCE_BYTES,
};
use crate::EciesError;

// SYMMETRIC ALGORITHM
// ================================================================================================

/// Authenticated ciphers available for the data encapsulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymmetricAlgorithm {
    /// AES-256 in Galois/Counter mode with a configurable nonce length.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "aes-256-gcm"))]
    Aes256Gcm,
    /// XChaCha20-Poly1305 with its fixed 192-bit nonce.
    #[cfg_attr(feature = "serde", serde(rename = "xchacha20"))]
    XChaCha20Poly1305,
}

impl SymmetricAlgorithm {
    /// Returns the identifier used in configuration files.
    pub const fn name(&self) -> &'static str {
        match self {
            SymmetricAlgorithm::Aes256Gcm => "aes-256-gcm",
            SymmetricAlgorithm::XChaCha20Poly1305 => "xchacha20",
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes-256-gcm" => Ok(SymmetricAlgorithm::Aes256Gcm),
            "xchacha20" => Ok(SymmetricAlgorithm::XChaCha20Poly1305),
            _ => Err(EciesError::UnsupportedCipher(s.to_string())),
        }
    }
}

// AEAD CONFIG
// ================================================================================================

/// Selects the symmetric cipher and, for AES-256-GCM, the nonce length.
///
/// The default is AES-256-GCM with a 16-byte nonce. With the `serde` feature the configuration
/// reads from and writes to
/// `{ "symmetricAlgorithm": "aes-256-gcm", "symmetricNonceLength": 16 }`; missing fields take
/// their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct AeadConfig {
    symmetric_algorithm: SymmetricAlgorithm,
    symmetric_nonce_length: usize,
}

impl AeadConfig {
    /// Parses the algorithm name and builds a configuration from it.
    ///
    /// The nonce length is only checked when a cipher is built (see [Self::validate]).
    pub fn new(algorithm: &str, nonce_len: usize) -> Result<Self, EciesError> {
        let symmetric_algorithm = algorithm.parse().inspect_err(|_| {
            debug!(target: "k256_ecies::aead", algorithm, "unknown symmetric algorithm");
        })?;
        Ok(Self { symmetric_algorithm, symmetric_nonce_length: nonce_len })
    }

    /// AES-256-GCM with the given nonce length.
    pub const fn aes_256_gcm(nonce_len: usize) -> Self {
        Self {
            symmetric_algorithm: SymmetricAlgorithm::Aes256Gcm,
            symmetric_nonce_length: nonce_len,
        }
    }

    /// XChaCha20-Poly1305.
    pub const fn xchacha20() -> Self {
        Self {
            symmetric_algorithm: SymmetricAlgorithm::XChaCha20Poly1305,
            symmetric_nonce_length: XCHACHA20_NONCE_BYTES,
        }
    }

    /// Returns the selected cipher.
    pub fn algorithm(&self) -> SymmetricAlgorithm {
        self.symmetric_algorithm
    }

    /// Returns the nonce length the selected cipher uses.
    ///
    /// XChaCha20-Poly1305 always uses a 24-byte nonce, whatever length is configured.
    pub fn nonce_len(&self) -> usize {
        match self.symmetric_algorithm {
            SymmetricAlgorithm::Aes256Gcm => self.symmetric_nonce_length,
            SymmetricAlgorithm::XChaCha20Poly1305 => XCHACHA20_NONCE_BYTES,
        }
    }

    /// Checks that the configuration names a supported cipher setup.
    ///
    /// # Errors
    /// Returns [EciesError::UnsupportedNonceLength] if AES-256-GCM is configured with a nonce
    /// length outside [MIN_AES_GCM_NONCE_BYTES]..=[MAX_AES_GCM_NONCE_BYTES].
    pub fn validate(&self) -> Result<(), EciesError> {
        let supported = MIN_AES_GCM_NONCE_BYTES..=MAX_AES_GCM_NONCE_BYTES;
        match self.symmetric_algorithm {
            SymmetricAlgorithm::Aes256Gcm if !supported.contains(&self.symmetric_nonce_length) => {
                debug!(
                    target: "k256_ecies::aead",
                    nonce_len = self.symmetric_nonce_length,
                    "unsupported aes-256-gcm nonce length"
                );
                Err(EciesError::UnsupportedNonceLength(self.symmetric_nonce_length))
            },
            _ => Ok(()),
        }
    }
}

impl Default for AeadConfig {
    fn default() -> Self {
        Self::aes_256_gcm(DEFAULT_AES_GCM_NONCE_BYTES)
    }
}
