//! Shared proptest strategies for the integration tests and benchmarks.

use benc_types::{Dict, Value};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

/// arbitrary byte string for use with proptest, biased toward bytes with
/// meaning on the wire (`i`, `l`, `d`, `e`, `:`, digits)
pub fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        any::<u8>(),
        prop::sample::select(&b"ilde:-0123456789"[..]),
    ];
    vec(byte, 0..32)
}

/// arbitrary integer for use with proptest, including both bounds
pub fn arb_integer() -> impl Strategy<Value = i64> {
    prop_oneof![
        any::<i64>(),
        -1_000i64..1_000,
        Just(i64::MIN),
        Just(i64::MAX),
        Just(0),
    ]
}

/// arbitrary value tree for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_integer().prop_map(Value::Integer),
        arb_bytes().prop_map(Value::ByteString),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        8,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..8).prop_map(Value::List),
                btree_map(arb_bytes(), inner, 0..8)
                    .prop_map(|map| Value::Dictionary(map.into_iter().collect())),
            ]
        },
    )
}

/// arbitrary document (top-level dictionary) for use with proptest
pub fn arb_document() -> impl Strategy<Value = Value> {
    btree_map(arb_bytes(), arb_value(), 0..8)
        .prop_map(|map| Value::Dictionary(map.into_iter().collect::<Dict>()))
}

/// Deterministic document of roughly `entries` top-level keys, for benchmarks.
///
/// Each entry holds a small nested record so decoding exercises every value
/// kind.
#[must_use]
pub fn sample_document(entries: usize) -> Value {
    let mut root = Dict::new();
    for i in 0..entries {
        let mut record = Dict::new();
        record.insert("id", i64::try_from(i).unwrap_or(i64::MAX));
        record.insert("name", format!("entry-{i:06}"));
        record.insert("payload", vec![u8::try_from(i % 256).unwrap_or(0); 64]);
        record.insert(
            "tags",
            Value::List(vec!["alpha".into(), "beta".into(), Value::Integer(-1)]),
        );
        root.insert(format!("key-{i:06}"), record);
    }
    Value::Dictionary(root)
}
