#![no_main]

use benc_decoder::{BencDecoder, DecoderConfig, DuplicateKeys};
use libfuzzer_sys::fuzz_target;

// Fuzz target: single-value decoding under every key policy.
//
// Input format:
//   byte 0: policy bits (bit 0 = LastWins, bit 1 = strict ordering)
//   bytes 1..: payload
//
// A strict decode that succeeds is canonical: re-encoding must return
// exactly the input.
fuzz_target!(|data: &[u8]| {
    let Some((&policy, payload)) = data.split_first() else {
        return;
    };

    let config = DecoderConfig {
        duplicate_keys: if policy & 1 == 0 {
            DuplicateKeys::Reject
        } else {
            DuplicateKeys::LastWins
        },
        require_sorted_keys: policy & 2 != 0,
        max_depth: 64,
        ..DecoderConfig::default()
    };

    if let Ok(value) = BencDecoder::decode_value_with_config(payload, &config) {
        if config.require_sorted_keys {
            assert_eq!(benc_encoder::BencEncoder::encode(&value), payload);
        }
    }
});
