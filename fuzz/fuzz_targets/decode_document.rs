#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full document decoder entry point.
//
// Calls `BencDecoder::decode(data)` on arbitrary input bytes.
// Catches bugs in:
// - Marker dispatch and the top-level dictionary check
// - Integer and length grammar (leading zeros, -0, overflow)
// - Length plausibility against remaining input
// - Key policies (non-string, duplicate keys)
// - Depth limit enforcement
// - Trailing data detection
//
// Any document that does decode must re-encode and decode to itself.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = benc_decoder::BencDecoder::decode(data) {
        let bytes = benc_encoder::BencEncoder::encode(&value);
        let again = benc_decoder::BencDecoder::decode(&bytes).unwrap();
        assert_eq!(again, value);
    }
});
