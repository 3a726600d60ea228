use alloc::string::String;
use core::fmt;

use num::BigUint;
use tracing::debug;

use super::{COMPRESSED_PUBLIC_KEY_BYTES, FIELD_BYTES, UNCOMPRESSED_PUBLIC_KEY_BYTES};
use crate::{
    EciesError,
    curve::{CurveParams, CurveProvider, Secp256k1},
    field::{curve_rhs, is_odd, negate, sqrt_mod, write_padded},
};

// SEC1 PREFIXES
// ================================================================================================

const COMPRESSED_EVEN: u8 = 0x02;
const COMPRESSED_ODD: u8 = 0x03;
const UNCOMPRESSED: u8 = 0x04;
const HYBRID_EVEN: u8 = 0x06;
const HYBRID_ODD: u8 = 0x07;

// PUBLIC KEY
// ================================================================================================

/// An affine point on secp256k1 other than the point at infinity.
///
/// Values of this type always satisfy the curve equation: they are produced either by the curve
/// arithmetic or by [PublicKey::from_bytes], which validates its input.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    x: BigUint,
    y: BigUint,
}

impl PublicKey {
    /// Wraps affine coordinates without validating them.
    pub(crate) fn from_coordinates(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    /// Decodes a point from its compressed, uncompressed or hybrid SEC1 encoding.
    ///
    /// # Errors
    /// Returns [EciesError::MalformedPublicKey] if the input is empty, has the wrong length for
    /// its prefix, uses an unknown prefix, carries a coordinate that is not below the field
    /// prime, asserts the wrong parity (hybrid form) or does not lie on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EciesError> {
        decode_point(bytes, &Secp256k1::params()).inspect_err(|err| {
            debug!(target: "k256_ecies::keys", len = bytes.len(), %err, "rejected public key");
        })
    }

    /// Decodes a point from a hex string holding any of the SEC1 encodings.
    pub fn from_hex(hex_str: &str) -> Result<Self, EciesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the uncompressed SEC1 encoding `0x04 || X || Y`.
    pub fn to_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_BYTES] {
        self.encode_full(UNCOMPRESSED)
    }

    /// Returns the compressed SEC1 encoding: a parity prefix followed by X.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_BYTES] {
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_BYTES];
        out[0] = if is_odd(&self.y) { COMPRESSED_ODD } else { COMPRESSED_EVEN };
        write_padded(&mut out[1..], &self.x);
        out
    }

    /// Returns the hybrid SEC1 encoding: a parity prefix followed by X and Y.
    pub fn to_hybrid_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_BYTES] {
        self.encode_full(if is_odd(&self.y) { HYBRID_ODD } else { HYBRID_EVEN })
    }

    /// Returns the lowercase hex of the uncompressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Returns the affine x-coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Returns the affine y-coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Returns `true` if the point satisfies the curve equation.
    pub fn is_on_curve(&self) -> bool {
        Secp256k1::is_on_curve(self)
    }

    fn encode_full(&self, prefix: u8) -> [u8; UNCOMPRESSED_PUBLIC_KEY_BYTES] {
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_BYTES];
        out[0] = prefix;
        write_padded(&mut out[1..1 + FIELD_BYTES], &self.x);
        write_padded(&mut out[1 + FIELD_BYTES..], &self.y);
        out
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = EciesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

// DECODING
// ================================================================================================

fn decode_point(bytes: &[u8], params: &CurveParams) -> Result<PublicKey, EciesError> {
    let (&prefix, body) =
        bytes.split_first().ok_or(EciesError::MalformedPublicKey("empty input"))?;

    match prefix {
        COMPRESSED_EVEN | COMPRESSED_ODD => {
            if body.len() != params.byte_len {
                return Err(EciesError::MalformedPublicKey("invalid length for compressed key"));
            }
            decompress(body, prefix == COMPRESSED_ODD, params)
        },
        UNCOMPRESSED => {
            let point = decode_coordinates(body, params)?;
            check_curve_equation(point, params)
        },
        HYBRID_EVEN | HYBRID_ODD => {
            let point = decode_coordinates(body, params)?;
            if is_odd(&point.y) != (prefix == HYBRID_ODD) {
                return Err(EciesError::MalformedPublicKey("parity mismatch"));
            }
            check_curve_equation(point, params)
        },
        _ => Err(EciesError::MalformedPublicKey("unknown prefix")),
    }
}

/// Recovers Y from X and the requested parity.
fn decompress(body: &[u8], odd: bool, params: &CurveParams) -> Result<PublicKey, EciesError> {
    let x = decode_coordinate(body, params)?;

    let rhs = curve_rhs(&x, &params.b, &params.p);
    let mut y =
        sqrt_mod(&rhs, &params.p).ok_or(EciesError::MalformedPublicKey("not on the curve"))?;
    if is_odd(&y) != odd {
        y = negate(&y, &params.p);
    }
    // y = 0 has no partner of the other parity
    if is_odd(&y) != odd {
        return Err(EciesError::MalformedPublicKey("parity mismatch"));
    }

    Ok(PublicKey::from_coordinates(x, y))
}

fn decode_coordinates(body: &[u8], params: &CurveParams) -> Result<PublicKey, EciesError> {
    if body.len() != 2 * params.byte_len {
        return Err(EciesError::MalformedPublicKey("invalid length for uncompressed key"));
    }
    let (x, y) = body.split_at(params.byte_len);

    Ok(PublicKey::from_coordinates(decode_coordinate(x, params)?, decode_coordinate(y, params)?))
}

fn decode_coordinate(bytes: &[u8], params: &CurveParams) -> Result<BigUint, EciesError> {
    let value = BigUint::from_bytes_be(bytes);
    if value >= params.p {
        return Err(EciesError::MalformedPublicKey("coordinate out of range"));
    }
    Ok(value)
}

fn check_curve_equation(point: PublicKey, params: &CurveParams) -> Result<PublicKey, EciesError> {
    let lhs = &point.y * &point.y % &params.p;
    if lhs != curve_rhs(&point.x, &params.b, &params.p) {
        return Err(EciesError::MalformedPublicKey("not on the curve"));
    }
    Ok(point)
}
