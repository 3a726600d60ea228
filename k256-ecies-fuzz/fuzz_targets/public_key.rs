#![no_main]

use k256_ecies::PublicKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic; anything it accepts must re-encode to an equivalent point
    let Ok(public_key) = PublicKey::from_bytes(data) else {
        return;
    };
    assert!(public_key.is_on_curve());

    for encoding in [
        &public_key.to_bytes()[..],
        &public_key.to_compressed_bytes()[..],
        &public_key.to_hybrid_bytes()[..],
    ] {
        assert_eq!(PublicKey::from_bytes(encoding).as_ref(), Ok(&public_key));
    }
});
