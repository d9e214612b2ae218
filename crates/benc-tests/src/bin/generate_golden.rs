//! Golden fixture generator for the conformance test suite.
//!
//! This binary creates all fixture files under `tests/golden/`. Run it once
//! after changing the encoder to regenerate the committed payloads. The
//! conformance tests decode each fixture and compare the rendered value
//! against inline snapshots.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p benc-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                          | Contents                                  |
//! |-------------------------------|-------------------------------------------|
//! | torrent.benc                  | Single-file torrent metainfo              |
//! | nested.benc                   | Lists and dictionaries several levels deep |
//! | binary_keys.benc              | Keys ordered as raw unsigned bytes        |
//! | edge_cases/empty.benc         | The empty dictionary                      |
//! | edge_cases/extreme_integers.benc | `i64::MIN` and `i64::MAX`              |
//! | edge_cases/unsorted_keys.benc | Handcrafted: keys in descending order     |
//! | edge_cases/trailing_data.benc | Valid document + 4 extra bytes            |
//! | edge_cases/deep_nesting.benc  | 300 nested lists, past the default limit  |
//! | edge_cases/truncated.benc     | Handcrafted: string length past the end   |

#![allow(clippy::pedantic)]

use std::path::Path;

use benc_encoder::{BencEncoder, DictBuilder};
use benc_types::{Dict, Value};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_torrent(&golden_dir);
    generate_nested(&golden_dir);
    generate_binary_keys(&golden_dir);
    generate_edge_cases(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn generate_torrent(dir: &Path) {
    let announce = "http://tracker.example.invalid:6969/announce";
    let pieces: Vec<u8> = (0xE0..0xF4).collect();

    let mut info = DictBuilder::new();
    info.insert_int("length", 1_048_576)
        .insert("name", "sample.bin")
        .insert_int("piece length", 262_144)
        .insert_bytes("pieces", &pieces);

    let bytes = DictBuilder::new()
        .insert("announce", announce)
        .insert_list(
            "announce-list",
            vec![
                Value::List(vec![announce.into()]),
                Value::List(vec!["udp://backup.example.invalid:1337".into()]),
            ],
        )
        .insert("comment", "sample single-file torrent")
        .insert_int("creation date", 1_700_000_000)
        .insert_dict("info", &info)
        .encode();

    write_file(&dir.join("torrent.benc"), &bytes);
}

fn generate_nested(dir: &Path) {
    let mut c = Dict::new();
    c.insert("c", "");
    let mut b = Dict::new();
    b.insert("b", c);

    let a = Value::List(vec![
        Value::Integer(1),
        Value::List(vec![
            Value::Integer(2),
            Value::List(vec![Value::Integer(3), Value::List(vec![])]),
        ]),
        b.into(),
    ]);

    let bytes = DictBuilder::new()
        .insert("z", -1)
        .insert("a", a)
        .encode();

    write_file(&dir.join("nested.benc"), &bytes);
}

fn generate_binary_keys(dir: &Path) {
    let mut dict = Dict::new();
    dict.insert(vec![0x80], 3);
    dict.insert("a", 2);
    dict.insert("A", 1);
    dict.insert("", 0);

    write_file(
        &dir.join("binary_keys.benc"),
        &BencEncoder::encode(&dict.into()),
    );
}

fn generate_edge_cases(dir: &Path) {
    let edge = dir.join("edge_cases");

    write_file(&edge.join("empty.benc"), &DictBuilder::new().encode());

    let extremes = DictBuilder::new()
        .insert_int("max", i64::MAX)
        .insert_int("min", i64::MIN)
        .encode();
    write_file(&edge.join("extreme_integers.benc"), &extremes);

    // Handcrafted: the encoder always sorts, so this cannot come from it.
    write_file(
        &edge.join("unsorted_keys.benc"),
        b"d4:spam4:eggs3:cow3:mooe",
    );

    let mut trailing = DictBuilder::new().insert_int("a", 1).encode();
    trailing.extend_from_slice(b"junk");
    write_file(&edge.join("trailing_data.benc"), &trailing);

    let mut deep = b"d1:a".to_vec();
    deep.extend(std::iter::repeat_n(b'l', 300));
    deep.extend(std::iter::repeat_n(b'e', 301));
    write_file(&edge.join("deep_nesting.benc"), &deep);

    // Handcrafted: declares 40 bytes, provides 4.
    write_file(&edge.join("truncated.benc"), b"d8:announce40:http");
}
