//! secp256k1 key material: public points with their SEC1 codec, and private scalars.

use crate::curve::{CurveProvider, Secp256k1};

mod private_key;
pub use private_key::PrivateKey;

mod public_key;
pub use public_key::PublicKey;


// CONSTANTS
// ================================================================================================

/// Number of bytes in a serialized field element (and in a full-width private scalar).
pub const FIELD_BYTES: usize = <Secp256k1 as CurveProvider>::FIELD_BYTES;

/// Length of a compressed SEC1 point encoding.
pub const COMPRESSED_PUBLIC_KEY_BYTES: usize = 1 + FIELD_BYTES;

/// Length of an uncompressed (or hybrid) SEC1 point encoding.
pub const UNCOMPRESSED_PUBLIC_KEY_BYTES: usize = 1 + 2 * FIELD_BYTES;
