#![no_main]

use benc_wire::ByteSource;
use libfuzzer_sys::fuzz_target;

// Fuzz target: integer write->read roundtrip.
//
// Takes 8 bytes of fuzz input, interprets them as an i64, writes the
// literal, then reads it back and asserts the value and length match.
fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.get(..8) else {
        return;
    };
    let value = i64::from_le_bytes(bytes.try_into().unwrap());

    let mut out = Vec::new();
    benc_wire::number::write_integer(value, &mut out);
    assert_eq!(out.len(), benc_wire::number::integer_len(value));

    let mut src = benc_wire::SliceSource::new(&out[1..]);
    let decoded = benc_wire::number::read_integer(&mut src).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(src.offset(), out.len() - 1);
});
