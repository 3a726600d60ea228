//! secp256k1 curve provider backed by the `k256` crate.

use alloc::vec::Vec;

use k256::{
    AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, Scalar, U256,
    elliptic_curve::{
        ops::Reduce,
        sec1::{FromEncodedPoint, ToEncodedPoint},
    },
};
use num::BigUint;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use super::{CurveParams, CurveProvider};
use crate::{EciesError, PublicKey, field::write_padded};

// CONSTANTS
// ================================================================================================

const FIELD_BYTES: usize = 32;

const FIELD_PRIME: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

const GROUP_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

const GENERATOR_X: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65,
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

const CURVE_B: u32 = 7;

// SECP256K1
// ================================================================================================

/// The secp256k1 Koblitz curve, `y^2 = x^3 + 7` over `GF(2^256 - 2^32 - 977)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Secp256k1;

impl CurveProvider for Secp256k1 {
    const FIELD_BYTES: usize = FIELD_BYTES;

    fn params() -> CurveParams {
        CurveParams {
            name: "secp256k1",
            p: BigUint::from_bytes_be(&FIELD_PRIME),
            n: BigUint::from_bytes_be(&GROUP_ORDER),
            b: BigUint::from(CURVE_B),
            gx: BigUint::from_bytes_be(&GENERATOR_X),
            gy: BigUint::from_bytes_be(&GENERATOR_Y),
            byte_len: FIELD_BYTES,
        }
    }

    fn is_on_curve(point: &PublicKey) -> bool {
        to_affine(point).is_some()
    }

    fn scalar_mul(scalar: &[u8], point: &PublicKey) -> Result<PublicKey, EciesError> {
        let affine = to_affine(point).ok_or(EciesError::InvalidPublicKey)?;
        let scalar = reduce_scalar(scalar)?;

        from_affine(&(ProjectivePoint::from(affine) * scalar).to_affine())
    }

    fn scalar_base_mul(scalar: &[u8]) -> Result<PublicKey, EciesError> {
        let scalar = reduce_scalar(scalar)?;

        from_affine(&(ProjectivePoint::GENERATOR * scalar).to_affine())
    }

    fn random_scalar<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<Zeroizing<Vec<u8>>, EciesError> {
        let mut candidate = ScalarRepr::default();

        // rejection sampling: accept only canonical encodings of scalars in [1, n)
        loop {
            rng.try_fill_bytes(candidate.0.as_mut_slice())?;
            if bool::from(NonZeroScalar::from_repr(candidate.0).is_some()) {
                return Ok(Zeroizing::new(candidate.0.to_vec()));
            }
        }
    }
}

// HELPERS
// ================================================================================================

/// Converts a point into its `k256` affine representation, checking that it is on the curve.
fn to_affine(point: &PublicKey) -> Option<AffinePoint> {
    let mut x = FieldBytes::default();
    let mut y = FieldBytes::default();
    write_padded(&mut x, point.x());
    write_padded(&mut y, point.y());

    let encoded = EncodedPoint::from_affine_coordinates(&x, &y, false);
    AffinePoint::from_encoded_point(&encoded).into()
}

/// Converts a `k256` affine point back into coordinates; the identity has none.
fn from_affine(point: &AffinePoint) -> Result<PublicKey, EciesError> {
    let encoded = point.to_encoded_point(false);

    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(PublicKey::from_coordinates(
            BigUint::from_bytes_be(x),
            BigUint::from_bytes_be(y),
        )),
        _ => Err(EciesError::InvalidPrivateKey),
    }
}

/// Interprets `bytes` as a big-endian integer and reduces it modulo the group order.
fn reduce_scalar(bytes: &[u8]) -> Result<Scalar, EciesError> {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[leading_zeros..];
    if significant.len() > FIELD_BYTES {
        return Err(EciesError::MalformedPrivateKey("scalar is wider than 32 bytes"));
    }

    let mut repr = ScalarRepr::default();
    repr.0[FIELD_BYTES - significant.len()..].copy_from_slice(significant);

    Ok(<Scalar as Reduce<U256>>::reduce_bytes(&repr.0))
}

/// Big-endian scalar encoding that is wiped when dropped.
#[derive(Default)]
pub(super) struct ScalarRepr(pub(super) FieldBytes);

impl Zeroize for ScalarRepr {
    fn zeroize(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

impl Drop for ScalarRepr {
    fn drop(&mut self) {
        self.zeroize();
    }
}
