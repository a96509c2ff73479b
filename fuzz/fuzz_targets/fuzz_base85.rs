#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Decoding arbitrary text must either fail cleanly or round-trip
    // through the encoder
    if let Ok(decoded) = dxi::utils::base85::decode(data) {
        assert_eq!(decoded.len() % 4, 0);
        let _ = dxi::utils::base85::encode(&decoded);
    }
});
