use alloc::string::String;

use thiserror::Error;

/// Coarse classification of [EciesError] values.
///
/// Callers that only need to decide how to react to a failure (e.g. report bad input vs. alert
/// on tampering) can match on the kind instead of individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Byte sequences that are empty, too short, too long, carry an unknown prefix, an
    /// out-of-range coordinate, or a parity mismatch.
    MalformedInput,
    /// A key that is well-formed but unusable (point not on the curve, scalar that maps to the
    /// point at infinity, symmetric key of the wrong size).
    InvalidKey,
    /// A cipher identifier or nonce length that is not supported.
    UnsupportedConfiguration,
    /// An AEAD message that failed verification.
    AuthenticationFailure,
    /// The randomness source could not produce bytes.
    EntropyFailure,
    /// Failures of the underlying primitives that should not happen with valid inputs.
    Internal,
}

/// Error type for the ECIES primitives.
///
/// None of the messages carry secret material; authentication failures in particular use a
/// single message regardless of which part of the sealed message was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EciesError {
    #[error("cannot parse public key: {0}")]
    MalformedPublicKey(&'static str),
    #[error("cannot parse private key: {0}")]
    MalformedPrivateKey(&'static str),
    #[error("cannot decode hex string")]
    InvalidHex,
    #[error("invalid length of message: expected at least {min} bytes, got {actual}")]
    MessageTooShort { min: usize, actual: usize },
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid symmetric key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("unknown cipher: {0}")]
    UnsupportedCipher(String),
    #[error("unsupported nonce length for aes-256-gcm: {0}")]
    UnsupportedNonceLength(usize),
    #[error("cannot decrypt ciphertext")]
    DecryptionFailed,
    #[error("cannot read random bytes")]
    EntropyUnavailable,
    #[error("encryption failed")]
    EncryptionFailed,
    #[error("cannot derive key material")]
    KeyDerivationFailed,
}

impl EciesError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EciesError::MalformedPublicKey(_)
            | EciesError::MalformedPrivateKey(_)
            | EciesError::InvalidHex
            | EciesError::MessageTooShort { .. } => ErrorKind::MalformedInput,
            EciesError::InvalidPublicKey
            | EciesError::InvalidPrivateKey
            | EciesError::InvalidKeyLength { .. } => ErrorKind::InvalidKey,
            EciesError::UnsupportedCipher(_) | EciesError::UnsupportedNonceLength(_) => {
                ErrorKind::UnsupportedConfiguration
            },
            EciesError::DecryptionFailed => ErrorKind::AuthenticationFailure,
            EciesError::EntropyUnavailable => ErrorKind::EntropyFailure,
            EciesError::EncryptionFailed | EciesError::KeyDerivationFailed => ErrorKind::Internal,
        }
    }
}

impl From<hex::FromHexError> for EciesError {
    fn from(_err: hex::FromHexError) -> Self {
        EciesError::InvalidHex
    }
}

impl From<rand_core::Error> for EciesError {
    fn from(_err: rand_core::Error) -> Self {
        EciesError::EntropyUnavailable
    }
}
