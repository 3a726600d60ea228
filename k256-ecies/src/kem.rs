//! Key encapsulation: turns an ECDH shared point into a symmetric key.
//!
//! Both parties feed the KDF with the same seed, the sender's ephemeral public point followed by
//! the shared point, each in uncompressed SEC1 form. Which party holds which key is stated
//! explicitly with [KemRole].

use zeroize::Zeroizing;

use crate::{
    EciesError,
    kdf::{self, SharedKey},
    keys::{PrivateKey, PublicKey, UNCOMPRESSED_PUBLIC_KEY_BYTES},
};

/// Length of the KDF seed: two uncompressed points.
pub const KEM_SEED_BYTES: usize = 2 * UNCOMPRESSED_PUBLIC_KEY_BYTES;

/// The side of an ECIES exchange a key derivation is performed for.
#[derive(Debug, Clone, Copy)]
pub enum KemRole<'a> {
    /// The sender holds the ephemeral private key and knows the recipient's public point.
    Sender { ephemeral: &'a PrivateKey, recipient: &'a PublicKey },
    /// The recipient holds its long-term private key and receives the ephemeral public point.
    Receiver { recipient: &'a PrivateKey, ephemeral: &'a PublicKey },
}

/// Derives the symmetric key for `role`.
///
/// The sender and the recipient of the same exchange obtain identical keys.
pub fn derive_key(role: KemRole<'_>) -> Result<SharedKey, EciesError> {
    match role {
        KemRole::Sender { ephemeral, recipient } => {
            derive_shared_key(ephemeral.public_key(), ephemeral, recipient)
        },
        KemRole::Receiver { recipient, ephemeral } => {
            derive_shared_key(ephemeral, recipient, ephemeral)
        },
    }
}

/// Computes `private_key * peer` and expands `bound_point || shared_point` into a key.
///
/// # Errors
/// Returns [EciesError::InvalidPublicKey] if `peer` is not on the curve.
pub fn derive_shared_key(
    bound_point: &PublicKey,
    private_key: &PrivateKey,
    peer: &PublicKey,
) -> Result<SharedKey, EciesError> {
    let shared = private_key.shared_point(peer)?;

    let mut seed = Zeroizing::new([0u8; KEM_SEED_BYTES]);
    seed[..UNCOMPRESSED_PUBLIC_KEY_BYTES].copy_from_slice(&bound_point.to_bytes());
    seed[UNCOMPRESSED_PUBLIC_KEY_BYTES..].copy_from_slice(&shared.to_bytes());

    kdf::derive_key(&seed[..])
}
