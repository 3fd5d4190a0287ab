#![no_main]

use libfuzzer_sys::fuzz_target;

use hexfloat::{FromHex, ToHex};

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to a string (invalid UTF-8 becomes replacement chars)
    let source = String::from_utf8_lossy(data);

    // Parsing must never panic, and anything accepted must re-parse to the same bits
    if let Ok(value) = f64::from_hex(&source) {
        assert_eq!(f64::from_hex(&value.to_hex()), Ok(value));
    }
    if let Ok(value) = f32::from_hex(&source) {
        assert_eq!(f32::from_hex(&value.to_hex()), Ok(value));
    }
});
