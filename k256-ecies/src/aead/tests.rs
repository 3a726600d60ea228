use alloc::{string::ToString, vec::Vec};

use assert_matches::assert_matches;
use proptest::prelude::*;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
use rstest::rstest;

use super::*;

const KEY: [u8; KEY_BYTES] = [0x42; KEY_BYTES];

fn configs() -> [AeadConfig; 3] {
    [AeadConfig::aes_256_gcm(12), AeadConfig::default(), AeadConfig::xchacha20()]
}

#[rstest]
#[case::aes_gcm_12(AeadConfig::aes_256_gcm(12))]
#[case::aes_gcm_16(AeadConfig::default())]
#[case::xchacha20(AeadConfig::xchacha20())]
fn test_seal_open_roundtrip(#[case] config: AeadConfig) {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let cipher = SymmetricCipher::new(&KEY, &config).unwrap();

    for plaintext in [&b""[..], &b"a"[..], &b"attack at dawn"[..]] {
        let sealed = cipher.seal(&mut rng, plaintext).unwrap();
        assert_eq!(sealed.len(), config.nonce_len() + TAG_BYTES + plaintext.len());
        assert_eq!(cipher.open(&sealed).unwrap(), plaintext);
    }
}

#[rstest]
#[case::aes_gcm_12(AeadConfig::aes_256_gcm(12))]
#[case::aes_gcm_16(AeadConfig::default())]
#[case::xchacha20(AeadConfig::xchacha20())]
fn test_sealed_layout(#[case] config: AeadConfig) {
    let cipher = SymmetricCipher::new(&KEY, &config).unwrap();
    let nonce: Vec<u8> = (0..config.nonce_len() as u8).collect();
    let plaintext = b"layout check";

    let sealed = cipher.seal_with_nonce(&nonce, plaintext).unwrap();
    let header_len = nonce.len() + TAG_BYTES;

    assert_eq!(&sealed[..nonce.len()], &nonce[..]);
    assert_ne!(&sealed[header_len..], &plaintext[..]);

    // moving the tag behind the ciphertext must not verify
    let mut swapped = nonce.clone();
    swapped.extend_from_slice(&sealed[header_len..]);
    swapped.extend_from_slice(&sealed[nonce.len()..header_len]);
    assert_matches!(cipher.open(&swapped), Err(EciesError::DecryptionFailed));
}

#[test]
fn test_fresh_nonce_per_seal() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let cipher = SymmetricCipher::new(&KEY, &AeadConfig::default()).unwrap();

    let first = cipher.seal(&mut rng, b"same").unwrap();
    let second = cipher.seal(&mut rng, b"same").unwrap();

    assert_ne!(first, second);
}

#[rstest]
#[case::aes_gcm_12(AeadConfig::aes_256_gcm(12), 27)]
#[case::aes_gcm_16(AeadConfig::default(), 31)]
#[case::xchacha20(AeadConfig::xchacha20(), 39)]
fn test_open_rejects_short_messages(#[case] config: AeadConfig, #[case] len: usize) {
    let cipher = SymmetricCipher::new(&KEY, &config).unwrap();

    assert_matches!(
        cipher.open(&vec![0u8; len]),
        Err(EciesError::MessageTooShort { min, actual }) if min == len + 1 && actual == len
    );
    assert_matches!(cipher.open(&[]), Err(EciesError::MessageTooShort { actual: 0, .. }));
}

#[test]
fn test_header_only_message_is_authenticated() {
    let cipher = SymmetricCipher::new(&KEY, &AeadConfig::default()).unwrap();
    let forged = [0u8; DEFAULT_AES_GCM_NONCE_BYTES + TAG_BYTES];

    assert_matches!(cipher.open(&forged), Err(EciesError::DecryptionFailed));
}

#[test]
fn test_wrong_key_fails() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);

    for config in configs() {
        let sealed = SymmetricCipher::new(&KEY, &config).unwrap().seal(&mut rng, b"hi").unwrap();
        let other = SymmetricCipher::new(&[0x24; KEY_BYTES], &config).unwrap();

        assert_matches!(other.open(&sealed), Err(EciesError::DecryptionFailed));
    }
}

#[test]
fn test_configuration_mismatch_fails() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let sealed = SymmetricCipher::new(&KEY, &AeadConfig::default())
        .unwrap()
        .seal(&mut rng, b"hello")
        .unwrap();

    let aes12 = SymmetricCipher::new(&KEY, &AeadConfig::aes_256_gcm(12)).unwrap();
    assert_matches!(aes12.open(&sealed), Err(EciesError::DecryptionFailed));
}

#[rstest]
#[case::shortest(1)]
#[case::eight(8)]
#[case::thirteen(13)]
#[case::twenty_four(24)]
#[case::longest(32)]
fn test_configurable_aes_gcm_nonce_length(#[case] nonce_len: usize) {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let config = AeadConfig::aes_256_gcm(nonce_len);
    let cipher = SymmetricCipher::new(&KEY, &config).unwrap();

    let sealed = cipher.seal(&mut rng, b"any nonce length").unwrap();
    assert_eq!(sealed.len(), nonce_len + TAG_BYTES + 16);
    assert_eq!(cipher.open(&sealed).unwrap(), b"any nonce length");

    let neighbour = if nonce_len == MAX_AES_GCM_NONCE_BYTES {
        nonce_len - 1
    } else {
        nonce_len + 1
    };
    let other = SymmetricCipher::new(&KEY, &AeadConfig::aes_256_gcm(neighbour)).unwrap();
    assert_matches!(other.open(&sealed), Err(EciesError::DecryptionFailed));
}

#[rstest]
#[case::zero(0)]
#[case::too_long(MAX_AES_GCM_NONCE_BYTES + 1)]
fn test_unsupported_nonce_length(#[case] nonce_len: usize) {
    let config = AeadConfig::aes_256_gcm(nonce_len);

    assert_matches!(
        config.validate(),
        Err(EciesError::UnsupportedNonceLength(n)) if n == nonce_len
    );
    assert_matches!(
        SymmetricCipher::new(&KEY, &config),
        Err(EciesError::UnsupportedNonceLength(_))
    );
}

#[test]
fn test_xchacha_ignores_configured_nonce_length() {
    let config = AeadConfig::new("xchacha20", 16).unwrap();

    assert_eq!(config.nonce_len(), XCHACHA20_NONCE_BYTES);
    assert!(SymmetricCipher::new(&KEY, &config).is_ok());
}

#[rstest]
#[case(0)]
#[case(16)]
#[case(31)]
#[case(33)]
fn test_invalid_key_length(#[case] len: usize) {
    let key = vec![7u8; len];

    for config in configs() {
        assert_matches!(
            SymmetricCipher::new(&key, &config),
            Err(EciesError::InvalidKeyLength { expected: KEY_BYTES, actual }) if actual == len
        );
    }
}

#[test]
fn test_algorithm_names() {
    assert_eq!("aes-256-gcm".parse::<SymmetricAlgorithm>(), Ok(SymmetricAlgorithm::Aes256Gcm));
    assert_eq!(
        "xchacha20".parse::<SymmetricAlgorithm>(),
        Ok(SymmetricAlgorithm::XChaCha20Poly1305)
    );
    assert_eq!(SymmetricAlgorithm::XChaCha20Poly1305.to_string(), "xchacha20");

    assert_matches!(
        AeadConfig::new("aes-128-cbc", 16),
        Err(EciesError::UnsupportedCipher(name)) if name == "aes-128-cbc"
    );
    assert_matches!(
        "AES-256-GCM".parse::<SymmetricAlgorithm>(),
        Err(EciesError::UnsupportedCipher(_))
    );
}

#[test]
fn test_default_config() {
    let config = AeadConfig::default();

    assert_eq!(config.algorithm(), SymmetricAlgorithm::Aes256Gcm);
    assert_eq!(config.nonce_len(), DEFAULT_AES_GCM_NONCE_BYTES);
    assert_eq!(AeadConfig::new("aes-256-gcm", 16).unwrap(), config);
}

#[cfg(feature = "std")]
#[test]
fn test_convenience_roundtrip() {
    let config = AeadConfig::xchacha20();
    let sealed = seal(&KEY, b"with os rng", &config).unwrap();

    assert_eq!(open(&KEY, &sealed, &config).unwrap(), b"with os rng");
}

#[cfg(feature = "serde")]
#[test]
fn test_config_json() {
    let config: AeadConfig = serde_json::from_str(
        r#"{ "symmetricAlgorithm": "xchacha20", "symmetricNonceLength": 24 }"#,
    )
    .unwrap();
    assert_eq!(config, AeadConfig::xchacha20());

    let json = serde_json::to_string(&AeadConfig::default()).unwrap();
    assert_eq!(json, r#"{"symmetricAlgorithm":"aes-256-gcm","symmetricNonceLength":16}"#);

    let partial: AeadConfig = serde_json::from_str(r#"{ "symmetricNonceLength": 12 }"#).unwrap();
    assert_eq!(partial, AeadConfig::aes_256_gcm(12));

    assert!(serde_json::from_str::<AeadConfig>(r#"{ "symmetricAlgorithm": "rc4" }"#).is_err());
}

proptest! {
    #[test]
    fn prop_roundtrip_any_plaintext(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        seed in any::<u64>(),
        which in 0usize..3,
    ) {
        let config = configs()[which];
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let cipher = SymmetricCipher::new(&KEY, &config).unwrap();

        let sealed = cipher.seal(&mut rng, &plaintext).unwrap();
        prop_assert_eq!(cipher.open(&sealed).unwrap(), plaintext);
    }

    #[test]
    fn prop_any_flipped_bit_is_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
        which in 0usize..3,
    ) {
        let config = configs()[which];
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let cipher = SymmetricCipher::new(&KEY, &config).unwrap();

        let mut sealed = cipher.seal(&mut rng, &plaintext).unwrap();
        let index = position.index(sealed.len());
        sealed[index] ^= 1 << bit;

        prop_assert_eq!(cipher.open(&sealed), Err(EciesError::DecryptionFailed));
    }
}
