#![no_main]

use libfuzzer_sys::fuzz_target;

use hexfloat::{FromHex, ToHex};

fuzz_target!(|data: (u64, u32)| {
    let (f64_bits, f32_bits) = data;

    // f64 round-trip: to_hex output of every finite value parses back bit for bit
    let value = f64::from_bits(f64_bits);
    let hex = value.to_hex();
    if value.is_finite() {
        let parsed = f64::from_hex(&hex).map(f64::to_bits);
        assert_eq!(parsed, Ok(f64_bits), "f64 roundtrip mismatch: {value} -> {hex}");
    } else {
        assert!(f64::from_hex(&hex).is_err(), "{hex} should not parse");
    }

    // f32 round-trip
    let value = f32::from_bits(f32_bits);
    let hex = value.to_hex();
    if value.is_finite() {
        let parsed = f32::from_hex(&hex).map(f32::to_bits);
        assert_eq!(parsed, Ok(f32_bits), "f32 roundtrip mismatch: {value} -> {hex}");
    } else {
        assert!(f32::from_hex(&hex).is_err(), "{hex} should not parse");
    }
});
