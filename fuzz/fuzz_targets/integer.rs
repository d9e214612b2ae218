#![no_main]

use benc_wire::ByteSource;
use libfuzzer_sys::fuzz_target;

// Fuzz target: integer literal grammar.
//
// Catches bugs in:
// - Leading zero and negative zero detection
// - i64::MIN handling (magnitude one past i64::MAX)
// - Overflow in the digit accumulator
// - Missing terminator
//
// Whatever parses must print back to the same digits.
fuzz_target!(|data: &[u8]| {
    let mut src = benc_wire::SliceSource::new(data);
    if let Ok(n) = benc_wire::number::read_integer(&mut src) {
        let consumed = &data[..src.offset()];
        let mut out = Vec::new();
        benc_wire::number::write_integer(n, &mut out);
        assert_eq!(&out[1..], consumed);
    }
});
