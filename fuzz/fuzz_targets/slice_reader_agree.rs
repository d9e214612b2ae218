#![no_main]

use benc_decoder::{BencDecoder, DecoderConfig};
use libfuzzer_sys::fuzz_target;

// Fuzz target: slice and reader sources must agree.
//
// The slice path has a length hint and fails early on implausible
// lengths; the reader path reads incrementally. Both must accept the
// same documents and produce the same values.
fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig {
        allow_trailing_data: true,
        ..DecoderConfig::default()
    };
    let from_slice = BencDecoder::decode_with_config(data, &config);
    let from_reader = BencDecoder::decode_reader(data);

    match (from_slice, from_reader) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("slice and reader disagree: {a:?} vs {b:?}"),
    }
});
