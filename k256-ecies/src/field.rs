//! Arithmetic over the base field of the curve, expressed with arbitrary-precision integers.
//!
//! The point codec works on raw coordinates decoded from the wire, before anything is handed to
//! the curve provider. These helpers give it the handful of modular operations it needs
//! (square roots for decompression, the curve-equation right-hand side, parity and fixed-width
//! serialization) without tying it to a particular curve backend.

use alloc::vec::Vec;

use num::{BigUint, Integer, One, Zero};

/// Computes a square root of `a` modulo the odd prime `p`.
///
/// Returns `None` when `a` is not a quadratic residue modulo `p`. Which of the two roots is
/// returned is unspecified; callers pick the one with the parity they need.
///
/// Primes with `p = 3 (mod 4)` (which includes the secp256k1 field prime) take the single
/// exponentiation `a^((p + 1) / 4)`; all other primes go through Tonelli-Shanks.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(BigUint::zero());
    }

    let one = BigUint::one();
    let p_minus_one = p - &one;

    // Euler's criterion
    let legendre_exp = &p_minus_one >> 1usize;
    if a.modpow(&legendre_exp, p) != one {
        return None;
    }

    if p % 4u32 == BigUint::from(3u32) {
        let root = a.modpow(&((p + &one) >> 2usize), p);
        return Some(root);
    }

    // p - 1 = q * 2^s with q odd
    let mut q = p_minus_one.clone();
    let mut s = 0u32;
    while q.is_even() {
        q >>= 1usize;
        s += 1;
    }

    let mut z = BigUint::from(2u32);
    while z.modpow(&legendre_exp, p) != p_minus_one {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut root = a.modpow(&((&q + &one) >> 1usize), p);

    while t != one {
        // least i in (0, m) with t^(2^i) = 1
        let mut i = 0u32;
        let mut t_pow = t.clone();
        while t_pow != one {
            t_pow = (&t_pow * &t_pow) % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        root = (root * &b) % p;
    }

    Some(root)
}

/// Returns `x^3 + b mod p`, the right-hand side of the short Weierstrass equation with `a = 0`.
pub fn curve_rhs(x: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    let x3 = (x * x % p) * x % p;
    (x3 + b) % p
}

/// Returns `p - value mod p`, the additive inverse of `value` in the field.
pub fn negate(value: &BigUint, p: &BigUint) -> BigUint {
    (p - (value % p)) % p
}

/// Returns `true` if `value` is odd.
pub fn is_odd(value: &BigUint) -> bool {
    value.is_odd()
}

/// Writes `value` big-endian into `out`, left-padded with zeros to the full width of `out`.
///
/// `value` must fit into `out`; coordinates are always reduced below the field prime before they
/// reach this function, which guarantees it for field-sized buffers.
pub fn write_padded(out: &mut [u8], value: &BigUint) {
    let bytes = value.to_bytes_be();
    debug_assert!(bytes.len() <= out.len(), "value does not fit into {} bytes", out.len());

    let offset = out.len().saturating_sub(bytes.len());
    let skip = bytes.len().saturating_sub(out.len());
    out[..offset].fill(0);
    out[offset..].copy_from_slice(&bytes[skip..]);
}

/// Returns `value` big-endian, left-padded with zeros to exactly `len` bytes.
pub fn to_padded_bytes(value: &BigUint, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    write_padded(&mut out, value);
    out
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn secp256k1_p() -> BigUint {
        BigUint::from_bytes_be(
            &hex::decode("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
                .unwrap(),
        )
    }

    #[rstest]
    #[case::three_mod_four(23u32)]
    #[case::one_mod_eight(17u32)]
    #[case::five_mod_eight(13u32)]
    #[case::large_two_adicity(97u32)]
    fn sqrt_mod_finds_roots_of_every_residue(#[case] p: u32) {
        let p_big = BigUint::from(p);
        for x in 0..p {
            let square = BigUint::from(x * x % p);
            let root = sqrt_mod(&square, &p_big).expect("squares are residues");
            assert_eq!(&root * &root % &p_big, square);
        }
    }

    #[test]
    fn sqrt_mod_rejects_non_residues() {
        let p = BigUint::from(23u32);
        // quadratic residues mod 23 are {1, 2, 3, 4, 6, 8, 9, 12, 13, 16, 18}
        for non_residue in [5u32, 7, 10, 11, 14, 15, 17, 19, 20, 21, 22] {
            assert_eq!(sqrt_mod(&BigUint::from(non_residue), &p), None);
        }
    }

    #[test]
    fn write_padded_left_pads() {
        let mut out = [0xffu8; 4];
        write_padded(&mut out, &BigUint::from(0x0102u32));
        assert_eq!(out, [0, 0, 1, 2]);

        write_padded(&mut out, &BigUint::zero());
        assert_eq!(out, [0, 0, 0, 0]);
    }

    #[test]
    fn write_padded_fills_exact_width() {
        let p = secp256k1_p();
        let mut out = [0u8; 32];
        write_padded(&mut out, &(&p - 1u32));

        assert_eq!(BigUint::from_bytes_be(&out), &p - 1u32);
        assert_eq!(out[0], 0xff);
        assert_eq!(out[31], 0x2e);
    }

    #[test]
    fn negate_maps_zero_to_zero() {
        let p = secp256k1_p();
        assert!(negate(&BigUint::zero(), &p).is_zero());
        assert_eq!(negate(&BigUint::one(), &p), &p - 1u32);
    }

    proptest! {
        #[test]
        fn sqrt_mod_secp256k1_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
            let p = secp256k1_p();
            let x = BigUint::from_bytes_be(&bytes) % &p;
            let square = &x * &x % &p;

            let root = sqrt_mod(&square, &p).unwrap();
            prop_assert!(root == x || root == negate(&x, &p));
        }

        #[test]
        fn padded_bytes_have_fixed_width(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
            let value = BigUint::from_bytes_be(&bytes);
            let padded = to_padded_bytes(&value, 32);

            prop_assert_eq!(padded.len(), 32);
            prop_assert_eq!(BigUint::from_bytes_be(&padded), value);
        }
    }
}
