//! Conformance tests: golden fixture files decoded and rendered to insta snapshots.
//!
//! Each test reads a pre-built `.benc` fixture from `tests/golden/`, decodes
//! it with [`BencDecoder`], and compares the rendered value (or error
//! message) against an inline snapshot. Canonical fixtures are also
//! re-encoded and checked byte-for-byte against the file.
//!
//! # Why golden files?
//!
//! The generator binary (`src/bin/generate_golden.rs`) writes deterministic
//! payloads once and commits them. A diff here signals either a deliberate
//! format change (regenerate the fixtures and accept via `cargo insta
//! review`) or an accidental regression in the decoder or encoder.

use std::path::Path;

use benc_decoder::{BencDecoder, DecoderConfig};
use benc_encoder::BencEncoder;
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read a golden fixture from `tests/golden/<name>`.
fn golden(name: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir.join("tests/golden").join(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Decode a fixture and render it, panicking with context on failure.
fn render(name: &str) -> String {
    let payload = golden(name);
    BencDecoder::decode(&payload)
        .unwrap_or_else(|e| panic!("decode failed for {name}: {e}"))
        .to_string()
}

/// Decode a fixture that must fail and render the error message.
fn render_error(name: &str, config: &DecoderConfig) -> String {
    let payload = golden(name);
    match BencDecoder::decode_with_config(&payload, config) {
        Ok(value) => panic!("{name} decoded unexpectedly: {value}"),
        Err(e) => e.to_string(),
    }
}

/// Assert that a canonical fixture re-encodes to exactly its own bytes.
fn assert_canonical(name: &str) {
    let payload = golden(name);
    let value = BencDecoder::decode(&payload).expect("decode");
    assert_eq!(
        BencEncoder::encode(&value),
        payload,
        "{name} did not re-encode byte-identically"
    );
}

// ── Canonical fixtures ────────────────────────────────────────────────────────

#[test]
fn torrent() {
    assert_snapshot!(render("torrent.benc"), @r#"{"announce": "http://tracker.example.invalid:6969/announce", "announce-list": [["http://tracker.example.invalid:6969/announce"], ["udp://backup.example.invalid:1337"]], "comment": "sample single-file torrent", "creation date": 1700000000, "info": {"length": 1048576, "name": "sample.bin", "piece length": 262144, "pieces": 0xe0e1e2e3e4e5e6e7e8e9eaebecedeeeff0f1f2f3}}"#);
    assert_canonical("torrent.benc");
}

#[test]
fn nested() {
    assert_snapshot!(render("nested.benc"), @r#"{"a": [1, [2, [3, []]], {"b": {"c": ""}}], "z": -1}"#);
    assert_canonical("nested.benc");
}

#[test]
fn binary_keys() {
    assert_snapshot!(render("binary_keys.benc"), @r#"{"": 0, "A": 1, "a": 2, 0x80: 3}"#);
    assert_canonical("binary_keys.benc");
}

#[test]
fn empty() {
    assert_snapshot!(render("edge_cases/empty.benc"), @"{}");
    assert_canonical("edge_cases/empty.benc");
}

#[test]
fn extreme_integers() {
    assert_snapshot!(render("edge_cases/extreme_integers.benc"), @r#"{"max": 9223372036854775807, "min": -9223372036854775808}"#);
    assert_canonical("edge_cases/extreme_integers.benc");
}

// ── Non-canonical and malformed fixtures ──────────────────────────────────────

#[test]
fn unsorted_keys_accepted_by_default() {
    assert_snapshot!(render("edge_cases/unsorted_keys.benc"), @r#"{"cow": "moo", "spam": "eggs"}"#);

    // Re-encoding canonicalizes the order.
    let value = BencDecoder::decode(&golden("edge_cases/unsorted_keys.benc")).unwrap();
    assert_eq!(BencEncoder::encode(&value), b"d3:cow3:moo4:spam4:eggse");
}

#[test]
fn unsorted_keys_rejected_when_strict() {
    let message = render_error("edge_cases/unsorted_keys.benc", &DecoderConfig::strict());
    assert_snapshot!(message, @"dictionary key cow at offset 13 is out of order");
}

#[test]
fn trailing_data() {
    let message = render_error("edge_cases/trailing_data.benc", &DecoderConfig::default());
    assert_snapshot!(message, @"unexpected data after document (4 bytes)");
}

#[test]
fn deep_nesting() {
    let message = render_error("edge_cases/deep_nesting.benc", &DecoderConfig::default());
    assert_snapshot!(message, @"nesting depth exceeds limit 256 at offset 259");
}

#[test]
fn truncated() {
    let message = render_error("edge_cases/truncated.benc", &DecoderConfig::default());
    assert_snapshot!(message, @"byte string at offset 11 declares 40 bytes, only 4 remain");
}
