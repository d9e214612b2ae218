#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use benc_decoder::{BencDecoder, DecoderConfig};
use benc_encoder::BencEncoder;
use benc_types::{Dict, Value};
use libfuzzer_sys::fuzz_target;

/// Arbitrary-derived mirror of the value tree.
#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Integer(i64),
    ByteString(Vec<u8>),
    List(Vec<FuzzValue>),
    Dictionary(Vec<(Vec<u8>, FuzzValue)>),
}

impl FuzzValue {
    fn depth(&self) -> usize {
        match self {
            Self::Integer(_) | Self::ByteString(_) => 0,
            Self::List(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Dictionary(pairs) => 1 + pairs.iter().map(|(_, v)| v.depth()).max().unwrap_or(0),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Integer(n) => Value::Integer(n),
            Self::ByteString(bytes) => Value::ByteString(bytes),
            Self::List(items) => Value::List(items.into_iter().map(Self::into_value).collect()),
            Self::Dictionary(pairs) => Value::Dictionary(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, v.into_value()))
                    .collect::<Dict>(),
            ),
        }
    }
}

// Fuzz target: encode->decode roundtrip over arbitrary value trees.
//
// The tree is wrapped in a one-entry document so the document entry point
// applies. Decoding in strict mode also checks that the encoder emits
// keys in canonical order.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(tree) = FuzzValue::arbitrary(&mut u) else {
        return;
    };
    // Stay inside the default depth limit, counting the wrapping document.
    if tree.depth() >= benc_decoder::config::DEFAULT_MAX_DEPTH {
        return;
    }

    let mut root = Dict::new();
    root.insert("v", tree.into_value());
    let doc = Value::Dictionary(root);

    let bytes = BencEncoder::encode(&doc);
    assert_eq!(bytes.len(), BencEncoder::encoded_len(&doc));

    let decoded = BencDecoder::decode_with_config(&bytes, &DecoderConfig::strict()).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(BencEncoder::encode(&decoded), bytes);
});
