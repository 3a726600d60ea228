//! Elliptic Curve Integrated Encryption Scheme (ECIES) over secp256k1.
//!
//! The crate combines three layers:
//!
//! - the SEC1 point codec and key pairs in [keys],
//! - a key encapsulation mechanism ([kem]) that hashes an ECDH shared point with HKDF-SHA256,
//! - authenticated data encapsulation ([aead]) with AES-256-GCM or XChaCha20-Poly1305.
//!
//! The [ies] module chains them into a sealed box addressed to a recipient's public key.

#![no_std]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod aead;
pub mod curve;
mod error;
pub mod field;
pub mod ies;
pub mod kdf;
pub mod kem;
pub mod keys;

// RE-EXPORTS
// ================================================================================================

pub use aead::{AeadConfig, SymmetricAlgorithm, SymmetricCipher};
pub use error::{EciesError, ErrorKind};
pub use kdf::SharedKey;
pub use keys::{PrivateKey, PublicKey};
pub use num::BigUint;

// TESTS
// ================================================================================================
