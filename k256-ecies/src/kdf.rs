//! HKDF-SHA256 expansion of shared secrets into symmetric keys.

use hkdf::Hkdf;
use k256_ecies_derive::SilentDebug;
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::EciesError;

/// Length of derived symmetric keys in bytes.
pub const KEY_BYTES: usize = 32;

// SHARED KEY
// ================================================================================================

/// A 256-bit symmetric key derived from an elliptic-curve shared secret.
#[derive(Clone, SilentDebug)]
pub struct SharedKey(#[secret] [u8; KEY_BYTES]);

impl SharedKey {
    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for SharedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedKey {}

impl Zeroize for SharedKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SharedKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SharedKey {}

// KEY DERIVATION
// ================================================================================================

/// Expands `secret` into a [KEY_BYTES]-byte key with HKDF-SHA256, using no salt and no info.
pub fn derive_key(secret: &[u8]) -> Result<SharedKey, EciesError> {
    let mut okm = [0u8; KEY_BYTES];
    Hkdf::<Sha256>::new(None, secret)
        .expand(&[], &mut okm)
        .map_err(|_| EciesError::KeyDerivationFailed)?;

    Ok(SharedKey(okm))
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    // RFC 5869, test case 3 (SHA-256, zero-length salt and info)
    #[test]
    fn rfc5869_no_salt_no_info() {
        let ikm = [0x0b_u8; 22];
        let expected =
            hex::decode("8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d")
                .unwrap();

        assert_eq!(derive_key(&ikm).unwrap().as_bytes()[..], expected[..]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key(b"shared secret").unwrap();
        let b = derive_key(b"shared secret").unwrap();
        let c = derive_key(b"other secret").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_output_elides_key() {
        let key = derive_key(&[0x0b; 22]).unwrap();
        let rendered = format!("{key:?}");

        assert_eq!(rendered, "SharedKey(<elided>)");
    }
}
