use std::io::BufRead;

use benc_types::Value;
use benc_wire::{ByteSource, ReaderSource, SliceSource};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::observer::{DecodeObserver, NoObserver};
use crate::parser::Parser;

/// Synchronous decoder: parses encoded bytes back into a [`Value`] tree.
///
/// It is the inverse of `BencEncoder::encode` from the `benc-encoder`
/// crate. Entry points come in three shapes:
///
/// ```text
/// ┌─────────────────────┬───────────────────────────┬─────────────────────┐
/// │ Entry point         │ Top-level value           │ After the value     │
/// ├─────────────────────┼───────────────────────────┼─────────────────────┤
/// │ decode*             │ must be a dictionary      │ TrailingData error  │
/// │ decode_value*       │ any kind                  │ TrailingData error  │
/// │ decode_prefix       │ any kind                  │ reported as length  │
/// │ decode_reader*      │ must be a dictionary      │ left unread         │
/// └─────────────────────┴───────────────────────────┴─────────────────────┘
/// ```
///
/// All entry points reject malformed input as a whole: a decode either
/// returns the complete tree or an error, never a partial value.
///
/// # Example
///
/// ```rust
/// use benc_decoder::BencDecoder;
/// use benc_types::Value;
///
/// let doc = BencDecoder::decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
/// assert_eq!(doc.get("cow"), Some(&Value::from("moo")));
/// ```
pub struct BencDecoder;

impl BencDecoder {
    /// Decode a complete document from a byte slice with the default
    /// [`DecoderConfig`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NotADictionary`] if the first byte is not `d`.
    /// - [`DecodeError::TrailingData`] if bytes follow the document.
    /// - Any error of [`decode_value`](Self::decode_value).
    pub fn decode(payload: &[u8]) -> Result<Value, DecodeError> {
        Self::decode_with_config(payload, &DecoderConfig::default())
    }

    /// Same as [`decode`](Self::decode) with explicit limits and policies.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn decode_with_config(
        payload: &[u8],
        config: &DecoderConfig,
    ) -> Result<Value, DecodeError> {
        Self::decode_slice(payload, config, &mut NoObserver, true)
    }

    /// Decode a document while reporting traversal events to `observer`.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode). The error is also passed to
    /// [`DecodeObserver::on_error`] before being returned.
    pub fn decode_observed<O: DecodeObserver + ?Sized>(
        payload: &[u8],
        config: &DecoderConfig,
        observer: &mut O,
    ) -> Result<Value, DecodeError> {
        let result = Self::decode_slice(payload, config, observer, true);
        if let Err(e) = &result {
            observer.on_error(e);
        }
        result
    }

    /// Decode a single value of any kind from a byte slice.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedTerminator`] / [`DecodeError::InvalidMarker`]
    ///   if a value starts with a byte that cannot open one.
    /// - [`DecodeError::InvalidKey`] if a dictionary key is not a byte string.
    /// - [`DecodeError::DuplicateKey`] / [`DecodeError::UnsortedKey`] per
    ///   the configured key policies.
    /// - [`DecodeError::DepthExceeded`] beyond `max_depth`.
    /// - [`DecodeError::StringTooLarge`] / [`DecodeError::LengthExceedsInput`]
    ///   for implausible byte-string lengths.
    /// - [`DecodeError::Wire`] for malformed numbers or truncated input.
    /// - [`DecodeError::TrailingData`] if bytes follow the value.
    pub fn decode_value(payload: &[u8]) -> Result<Value, DecodeError> {
        Self::decode_value_with_config(payload, &DecoderConfig::default())
    }

    /// Same as [`decode_value`](Self::decode_value) with explicit limits and
    /// policies.
    ///
    /// # Errors
    ///
    /// See [`decode_value`](Self::decode_value).
    pub fn decode_value_with_config(
        payload: &[u8],
        config: &DecoderConfig,
    ) -> Result<Value, DecodeError> {
        Self::decode_slice(payload, config, &mut NoObserver, false)
    }

    /// Decode the value at the front of `payload` and report how many bytes
    /// it occupied. Whatever follows is ignored.
    ///
    /// # Errors
    ///
    /// See [`decode_value`](Self::decode_value), except `TrailingData`.
    pub fn decode_prefix(payload: &[u8]) -> Result<(Value, usize), DecodeError> {
        let config = DecoderConfig::default();
        let mut observer = NoObserver;
        let mut parser = Parser::new(SliceSource::new(payload), &config, &mut observer);
        let value = parser.parse_value()?;
        Ok((value, parser.source().offset()))
    }

    /// Decode one document from a buffered reader.
    ///
    /// Reading stops at the document's closing terminator; any bytes after
    /// it remain in the reader. Pass `&mut reader` to keep using it.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode), except `TrailingData`, plus
    /// [`DecodeError::Wire`] wrapping I/O failures.
    pub fn decode_reader<R: BufRead>(reader: R) -> Result<Value, DecodeError> {
        Self::decode_reader_with_config(reader, &DecoderConfig::default())
    }

    /// Same as [`decode_reader`](Self::decode_reader) with explicit limits
    /// and policies.
    ///
    /// # Errors
    ///
    /// See [`decode_reader`](Self::decode_reader).
    pub fn decode_reader_with_config<R: BufRead>(
        reader: R,
        config: &DecoderConfig,
    ) -> Result<Value, DecodeError> {
        let mut observer = NoObserver;
        let mut parser = Parser::new(ReaderSource::new(reader), config, &mut observer);
        parser.parse_document()
    }

    /// Shared slice implementation.
    fn decode_slice<O: DecodeObserver + ?Sized>(
        payload: &[u8],
        config: &DecoderConfig,
        observer: &mut O,
        document: bool,
    ) -> Result<Value, DecodeError> {
        let mut parser = Parser::new(SliceSource::new(payload), config, observer);
        let value = if document {
            parser.parse_document()?
        } else {
            parser.parse_value()?
        };

        let extra_bytes = parser.source().remaining().len();
        if extra_bytes > 0 && !config.allow_trailing_data {
            return Err(DecodeError::TrailingData { extra_bytes });
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateKeys;
    use crate::error::ErrorKind;
    use benc_encoder::BencEncoder;
    use benc_types::{Dict, ValueKind};
    use benc_wire::WireError;

    fn value(input: &[u8]) -> Result<Value, DecodeError> {
        BencDecoder::decode_value(input)
    }

    fn kind_of(result: Result<Value, DecodeError>) -> ErrorKind {
        result.expect_err("decode should fail").kind()
    }

    fn dict(pairs: &[(&str, Value)]) -> Value {
        pairs
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect::<Dict>()
            .into()
    }

    // ── Integers ─────────────────────────────────────────────────────────

    #[test]
    fn integer_literals() {
        assert_eq!(value(b"i0e").unwrap(), Value::Integer(0));
        assert_eq!(value(b"i-42e").unwrap(), Value::Integer(-42));
        assert_eq!(value(b"i42e").unwrap(), Value::Integer(42));
    }

    #[test]
    fn integer_non_canonical_is_format_error() {
        assert_eq!(kind_of(value(b"i007e")), ErrorKind::Format);
        assert_eq!(kind_of(value(b"i-0e")), ErrorKind::Format);
        assert_eq!(kind_of(value(b"ie")), ErrorKind::Format);
        assert_eq!(kind_of(value(b"i1.5e")), ErrorKind::Format);
    }

    #[test]
    fn integer_overflow() {
        assert_eq!(
            kind_of(value(b"i9223372036854775808e")),
            ErrorKind::IntegerOverflow
        );
        assert_eq!(
            value(b"i-9223372036854775808e").unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn integer_unterminated_is_truncation() {
        assert_eq!(kind_of(value(b"i42")), ErrorKind::TruncatedInput);
    }

    // ── Byte strings ─────────────────────────────────────────────────────

    #[test]
    fn byte_string_literals() {
        assert_eq!(value(b"4:spam").unwrap(), Value::from("spam"));
        assert_eq!(value(b"0:").unwrap(), Value::from(""));
        assert_eq!(
            value(b"3:\x00e:").unwrap(),
            Value::ByteString(vec![0x00, b'e', b':'])
        );
    }

    #[test]
    fn byte_string_declared_longer_than_input() {
        let err = value(b"5:spam").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthExceedsInput {
                offset: 0,
                len: 5,
                remaining: 4
            }
        ));
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn byte_string_bad_length_field() {
        assert_eq!(kind_of(value(b"04:spam")), ErrorKind::Format);
        assert_eq!(kind_of(value(b"4spam")), ErrorKind::Format);
        assert_eq!(kind_of(value(b"4")), ErrorKind::TruncatedInput);
    }

    #[test]
    fn byte_string_over_limit() {
        let config = DecoderConfig {
            max_string_len: Some(3),
            ..DecoderConfig::default()
        };
        let err = BencDecoder::decode_value_with_config(b"4:spam", &config).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::StringTooLarge {
                len: 4,
                limit: 3,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    }

    #[test]
    fn huge_declared_length_rejected_before_allocation() {
        let err = value(b"99999999999:x").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthExceedsInput {
                offset: 0,
                len: 99_999_999_999,
                remaining: 1,
            }
        ));
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn length_past_input_is_truncation_even_above_limit() {
        let config = DecoderConfig {
            max_string_len: Some(16),
            ..DecoderConfig::default()
        };
        let err = BencDecoder::decode_with_config(b"d1:a20000000:xe", &config).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthExceedsInput { offset: 4, remaining: 2, .. }
        ));
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn oversized_length_prefix_is_format_error() {
        let err = BencDecoder::decode(b"d1:a99999999999999999999999:xe").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Wire(WireError::LengthOverflow { offset: 4 })
        ));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    // ── Lists ────────────────────────────────────────────────────────────

    #[test]
    fn list_literals() {
        assert_eq!(
            value(b"l4:spam4:eggse").unwrap(),
            Value::List(vec!["spam".into(), "eggs".into()])
        );
        assert_eq!(value(b"le").unwrap(), Value::List(vec![]));
        assert_eq!(
            value(b"lli1eeli2eee").unwrap(),
            Value::List(vec![
                Value::List(vec![Value::Integer(1)]),
                Value::List(vec![Value::Integer(2)]),
            ])
        );
    }

    #[test]
    fn unclosed_list_is_truncation() {
        assert_eq!(kind_of(value(b"l4:spam")), ErrorKind::TruncatedInput);
        assert_eq!(kind_of(value(b"l")), ErrorKind::TruncatedInput);
    }

    // ── Dictionaries ─────────────────────────────────────────────────────

    #[test]
    fn dictionary_literal() {
        assert_eq!(
            BencDecoder::decode(b"d3:cow3:moo4:spam4:eggse").unwrap(),
            dict(&[("cow", "moo".into()), ("spam", "eggs".into())])
        );
        assert_eq!(BencDecoder::decode(b"de").unwrap(), Value::Dictionary(Dict::new()));
    }

    #[test]
    fn dictionary_integer_key_rejected() {
        let err = BencDecoder::decode(b"di1e3:mooe").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidKey {
                offset: 1,
                found: ValueKind::Integer
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn dictionary_key_without_value() {
        let err = BencDecoder::decode(b"d3:cowe").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTerminator { offset: 6 }));
    }

    #[test]
    fn duplicate_keys_rejected_by_default() {
        let err = BencDecoder::decode(b"d3:cowi1e3:cowi2ee").unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateKey { offset: 9, .. }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn duplicate_keys_last_wins_when_configured() {
        let config = DecoderConfig {
            duplicate_keys: DuplicateKeys::LastWins,
            ..DecoderConfig::default()
        };
        let doc = BencDecoder::decode_with_config(b"d3:cowi1e3:cowi2ee", &config).unwrap();
        assert_eq!(doc, dict(&[("cow", Value::Integer(2))]));
    }

    #[test]
    fn unsorted_keys_accepted_unless_strict() {
        let input = b"d4:spam4:eggs3:cow3:mooe";
        let doc = BencDecoder::decode(input).unwrap();
        // Re-encoding canonicalizes the order
        assert_eq!(BencEncoder::encode(&doc), b"d3:cow3:moo4:spam4:eggse");

        let err = BencDecoder::decode_with_config(input, &DecoderConfig::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::UnsortedKey { offset: 13, .. }));
    }

    #[test]
    fn strict_accepts_canonical_input() {
        let input = b"d1:ai1e1:bi2ee";
        assert!(BencDecoder::decode_with_config(input, &DecoderConfig::strict()).is_ok());
    }

    // ── Document entry point ─────────────────────────────────────────────

    #[test]
    fn document_must_be_dictionary() {
        for input in [&b"i1e"[..], &b"4:spam"[..], &b"le"[..]] {
            assert!(value(input).is_ok());
            let err = BencDecoder::decode(input).unwrap_err();
            assert!(matches!(err, DecodeError::NotADictionary { .. }));
            assert_eq!(err.kind(), ErrorKind::Format);
        }
        assert!(matches!(
            BencDecoder::decode(b""),
            Err(DecodeError::NotADictionary { found: None })
        ));
    }

    #[test]
    fn unexpected_terminator_at_top_level() {
        assert!(matches!(
            value(b"e"),
            Err(DecodeError::UnexpectedTerminator { offset: 0 })
        ));
    }

    #[test]
    fn invalid_marker() {
        assert!(matches!(
            value(b"lxe"),
            Err(DecodeError::InvalidMarker {
                offset: 1,
                found: b'x'
            })
        ));
    }

    #[test]
    fn trailing_data_rejected() {
        let err = BencDecoder::decode(b"dei1e").unwrap_err();
        assert!(matches!(err, DecodeError::TrailingData { extra_bytes: 3 }));

        let config = DecoderConfig {
            allow_trailing_data: true,
            ..DecoderConfig::default()
        };
        assert!(BencDecoder::decode_with_config(b"dei1e", &config).is_ok());
    }

    #[test]
    fn unclosed_dictionary_is_truncation() {
        assert_eq!(
            kind_of(BencDecoder::decode(b"d3:cow3:moo")),
            ErrorKind::TruncatedInput
        );
    }

    // ── Depth limit ──────────────────────────────────────────────────────

    #[test]
    fn depth_limit_enforced() {
        let config = DecoderConfig {
            max_depth: 3,
            ..DecoderConfig::default()
        };
        // dict > list > list: depth 3, allowed
        assert!(BencDecoder::decode_with_config(b"d1:alleee", &config).is_ok());

        // dict > list > list > list: depth 4
        let err = BencDecoder::decode_with_config(b"d1:allleeee", &config).unwrap_err();
        assert!(matches!(err, DecodeError::DepthExceeded { offset: 6, limit: 3 }));
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    }

    #[test]
    fn adversarial_nesting_fails_cleanly() {
        let mut input = b"d1:a".to_vec();
        input.extend(std::iter::repeat_n(b'l', 100_000));
        let err = BencDecoder::decode(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    }

    // ── Prefix and reader entry points ───────────────────────────────────

    #[test]
    fn prefix_reports_consumed_bytes() {
        let (value, consumed) = BencDecoder::decode_prefix(b"4:spami1e").unwrap();
        assert_eq!(value, Value::from("spam"));
        assert_eq!(consumed, 6);
    }

    #[test]
    fn reader_leaves_following_bytes_unread() {
        let mut reader = &b"d1:ai1eed1:bi2ee"[..];
        let first = BencDecoder::decode_reader(&mut reader).unwrap();
        assert_eq!(first, dict(&[("a", Value::Integer(1))]));
        assert_eq!(reader, b"d1:bi2ee");

        let second = BencDecoder::decode_reader(&mut reader).unwrap();
        assert_eq!(second, dict(&[("b", Value::Integer(2))]));
        assert!(reader.is_empty());
    }

    #[test]
    fn reader_truncated_string() {
        let err = BencDecoder::decode_reader(&b"d1:a5:spam"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    // ── Observer ─────────────────────────────────────────────────────────

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        errors: usize,
    }

    impl DecodeObserver for Recorder {
        fn on_enter(&mut self, kind: ValueKind, depth: usize, offset: usize) {
            self.events.push(format!("enter {kind} {depth} @{offset}"));
        }

        fn on_exit(&mut self, kind: ValueKind, depth: usize, offset: usize) {
            self.events.push(format!("exit {kind} {depth} @{offset}"));
        }

        fn on_leaf(&mut self, kind: ValueKind, depth: usize, offset: usize) {
            self.events.push(format!("{kind} {depth} @{offset}"));
        }

        fn on_error(&mut self, _error: &DecodeError) {
            self.errors += 1;
        }
    }

    #[test]
    fn observer_sees_traversal() {
        let mut recorder = Recorder::default();
        BencDecoder::decode_observed(b"d1:ali7eee", &DecoderConfig::default(), &mut recorder)
            .unwrap();
        assert_eq!(
            recorder.events,
            vec![
                "enter dictionary 1 @0",
                "enter list 2 @4",
                "integer 3 @5",
                "exit list 2 @9",
                "exit dictionary 1 @10",
            ]
        );
        assert_eq!(recorder.errors, 0);
    }

    #[test]
    fn observer_told_about_failure() {
        let mut recorder = Recorder::default();
        let result =
            BencDecoder::decode_observed(b"d1:a", &DecoderConfig::default(), &mut recorder);
        assert!(result.is_err());
        assert_eq!(recorder.errors, 1);
    }

    #[test]
    fn log_observer_is_accepted() {
        let mut observer = crate::observer::LogObserver;
        let doc =
            BencDecoder::decode_observed(b"d1:ai1ee", &DecoderConfig::default(), &mut observer)
                .unwrap();
        assert_eq!(doc, dict(&[("a", Value::Integer(1))]));
    }

    // ── Round trip ───────────────────────────────────────────────────────

    #[test]
    fn decode_then_encode_is_identity_for_canonical_input() {
        let input: &[u8] = b"d4:infod6:lengthi1024e4:name5:a.txte4:listli-1e0:lee3:numi0ee";
        let doc = BencDecoder::decode(input).unwrap();
        assert_eq!(BencEncoder::encode(&doc), input);
    }
}
