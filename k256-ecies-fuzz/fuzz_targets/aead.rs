#![no_main]

use k256_ecies::{AeadConfig, PrivateKey, SymmetricCipher, ies::SealedMessage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Using a fixed key for deterministic fuzzing
    let key = [0u8; 32];
    let configs = [AeadConfig::aes_256_gcm(12), AeadConfig::default(), AeadConfig::xchacha20()];

    // Opening arbitrary bytes must fail cleanly; forging a tag is out of reach for the fuzzer
    for config in &configs {
        let cipher = SymmetricCipher::new(&key, config).expect("valid configuration");
        assert!(cipher.open(data).is_err());
    }

    let Ok(message) = SealedMessage::from_bytes(data) else {
        return;
    };
    assert_eq!(message.to_bytes().len(), data.len());

    let recipient = PrivateKey::from_bytes(&[1]).expect("scalar one is a valid key");
    for config in &configs {
        let _ = k256_ecies::ies::UnsealingKey::new(recipient.clone()).unseal(&message, config);
    }
});
