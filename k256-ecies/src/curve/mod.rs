//! Curve provider abstraction.
//!
//! Everything in this crate that needs group arithmetic (key generation, ECDH, key
//! encapsulation) goes through [CurveProvider]. The point codec only ever looks at
//! [CurveParams], so neither depends on the arithmetic backend that implements the trait.

use alloc::vec::Vec;

use num::BigUint;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::{EciesError, PublicKey};

mod secp256k1;
pub use secp256k1::Secp256k1;


// CURVE PARAMETERS
// ================================================================================================

/// Domain parameters of a short Weierstrass curve `y^2 = x^3 + b` over a prime field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    /// Human readable curve name.
    pub name: &'static str,
    /// Field prime.
    pub p: BigUint,
    /// Order of the base point.
    pub n: BigUint,
    /// Constant term of the curve equation.
    pub b: BigUint,
    /// Affine x-coordinate of the base point.
    pub gx: BigUint,
    /// Affine y-coordinate of the base point.
    pub gy: BigUint,
    /// Number of bytes needed to encode a field element.
    pub byte_len: usize,
}

// CURVE PROVIDER TRAIT
// ================================================================================================

/// Group operations over a single elliptic curve.
///
/// Points exchanged through this trait are always affine points other than the point at
/// infinity; operations that would produce the identity fail instead.
pub trait CurveProvider {
    /// Number of bytes needed to encode a field element.
    const FIELD_BYTES: usize;

    /// Returns the domain parameters of the curve.
    fn params() -> CurveParams;

    /// Returns `true` if the point satisfies the curve equation.
    fn is_on_curve(point: &PublicKey) -> bool;

    /// Multiplies `point` by the big-endian `scalar`.
    ///
    /// Scalars are reduced modulo the group order. Scalars wider than [Self::FIELD_BYTES]
    /// significant bytes are rejected.
    fn scalar_mul(scalar: &[u8], point: &PublicKey) -> Result<PublicKey, EciesError>;

    /// Multiplies the base point by the big-endian `scalar`.
    fn scalar_base_mul(scalar: &[u8]) -> Result<PublicKey, EciesError>;

    /// Draws a uniformly random scalar in `[1, n)` and returns its big-endian encoding.
    fn random_scalar<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<Zeroizing<Vec<u8>>, EciesError>;
}
