use alloc::{string::String, vec::Vec};

use k256_ecies_derive::SilentDebug;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{COMPRESSED_PUBLIC_KEY_BYTES, FIELD_BYTES, PublicKey};
use crate::{
    EciesError,
    curve::{CurveProvider, Secp256k1},
    kdf::SharedKey,
    kem::{self, KemRole},
};

// PRIVATE KEY
// ================================================================================================

/// A secp256k1 key pair: a private scalar `d` together with the public point `d * G`.
///
/// The scalar is kept as the minimal big-endian byte string it was created from. It is compared
/// in constant time, elided from `Debug` output and zeroed when the key is dropped.
#[derive(Clone, SilentDebug)]
pub struct PrivateKey {
    public_key: PublicKey,
    #[secret]
    scalar: Vec<u8>,
}

impl PrivateKey {
    /// Generates a new random key pair using the OS random number generator.
    #[cfg(feature = "std")]
    pub fn new() -> Result<Self, EciesError> {
        Self::with_rng(&mut rand_core::OsRng)
    }

    /// Generates a new random key pair using the provided random number generator.
    ///
    /// # Errors
    /// Returns [EciesError::EntropyUnavailable] if the generator fails to produce bytes.
    pub fn with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, EciesError> {
        let scalar = Secp256k1::random_scalar(rng)?;
        let key = Self::from_bytes(&scalar)?;
        trace!(target: "k256_ecies::keys", public_key = %key.public_key, "generated key pair");
        Ok(key)
    }

    /// Derives a key pair from a big-endian scalar.
    ///
    /// The scalar is not range checked: values at or above the group order are reduced modulo
    /// the order when the public point is computed.
    ///
    /// # Errors
    /// - [EciesError::MalformedPrivateKey] if the scalar has more than 32 significant bytes.
    /// - [EciesError::InvalidPrivateKey] if the scalar is zero modulo the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EciesError> {
        let start = bytes.iter().position(|&byte| byte != 0).unwrap_or(bytes.len());
        let scalar = &bytes[start..];
        if scalar.len() > FIELD_BYTES {
            return Err(EciesError::MalformedPrivateKey("scalar is wider than 32 bytes"));
        }

        let public_key = Secp256k1::scalar_base_mul(scalar)?;
        Ok(Self { public_key, scalar: scalar.to_vec() })
    }

    /// Derives a key pair from the hex encoding of a big-endian scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, EciesError> {
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Returns the big-endian scalar with leading zeros stripped.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.scalar.clone())
    }

    /// Returns the lowercase hex encoding of [Self::to_bytes].
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.scalar))
    }

    /// Returns the public point of this key pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Derives a symmetric key shared with `peer`, acting as the sender of an ECIES message.
    ///
    /// The key binds this key pair's own public point. The holder of `peer`'s private key
    /// derives the same key with [Self::decapsulate].
    pub fn encapsulate(&self, peer: &PublicKey) -> Result<SharedKey, EciesError> {
        kem::derive_key(KemRole::Sender { ephemeral: self, recipient: peer })
    }

    /// Derives the symmetric key a sender produced with [Self::encapsulate], given the sender's
    /// ephemeral public point.
    pub fn decapsulate(&self, ephemeral: &PublicKey) -> Result<SharedKey, EciesError> {
        kem::derive_key(KemRole::Receiver { recipient: self, ephemeral })
    }

    /// Computes raw ECDH with `peer`.
    ///
    /// Returns the compressed encoding of the shared point. The output is not uniformly random
    /// and must not be used as a symmetric key directly.
    pub fn ecdh(
        &self,
        peer: &PublicKey,
    ) -> Result<Zeroizing<[u8; COMPRESSED_PUBLIC_KEY_BYTES]>, EciesError> {
        let shared = self.shared_point(peer)?;
        Ok(Zeroizing::new(shared.to_compressed_bytes()))
    }

    /// Multiplies `peer` by the private scalar.
    pub(crate) fn shared_point(&self, peer: &PublicKey) -> Result<PublicKey, EciesError> {
        if !Secp256k1::is_on_curve(peer) {
            debug!(target: "k256_ecies::keys", "peer public key is not on the curve");
            return Err(EciesError::InvalidPublicKey);
        }
        Secp256k1::scalar_mul(&self.scalar, peer)
    }

    fn padded_scalar(&self) -> Zeroizing<[u8; FIELD_BYTES]> {
        let mut out = Zeroizing::new([0u8; FIELD_BYTES]);
        out[FIELD_BYTES - self.scalar.len()..].copy_from_slice(&self.scalar);
        out
    }
}

// EQUALITY
// ================================================================================================

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.padded_scalar()[..].ct_eq(&other.padded_scalar()[..])
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

// ZEROIZATION
// ================================================================================================

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}
