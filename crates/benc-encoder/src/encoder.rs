use std::io::Write;

use benc_types::{Dict, Value};
use benc_wire::marker::{DICTIONARY, END, LIST};
use benc_wire::number::{integer_len, length_prefix_len, write_integer, write_length};

use crate::error::EncodeError;

/// Canonical encoder: serializes a [`Value`] tree into its unique byte form.
///
/// Dispatch is one exhaustive match over the four value kinds:
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────┐
/// │ Integer(n)   │ 'i' decimal(n) 'e'  (no '+', no leading 0)   │
/// │ ByteString   │ decimal(len) ':' raw bytes                   │
/// │ List         │ 'l' items in order 'e'                       │
/// │ Dictionary   │ 'd' (key, value) by ascending key bytes 'e'  │
/// └──────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Output is a pure function of the tree: encoding the same value twice, or
/// re-encoding a decoded canonical payload, produces identical bytes.
///
/// # Example
///
/// ```rust
/// use benc_encoder::BencEncoder;
/// use benc_types::{Dict, Value};
///
/// let mut dict = Dict::new();
/// dict.insert("spam", "eggs");
/// dict.insert("cow", "moo");
///
/// let bytes = BencEncoder::encode(&Value::from(dict));
/// assert_eq!(bytes, b"d3:cow3:moo4:spam4:eggse");
/// ```
pub struct BencEncoder;

impl BencEncoder {
    /// Encode `value` into a freshly allocated buffer sized exactly for it.
    #[must_use]
    pub fn encode(value: &Value) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::encoded_len(value));
        Self::encode_into(value, &mut out);
        out
    }

    /// Append the encoding of `value` to `out`.
    pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Integer(n) => write_integer(*n, out),
            Value::ByteString(bytes) => write_byte_string(bytes, out),
            Value::List(items) => {
                out.push(LIST);
                for item in items {
                    Self::encode_into(item, out);
                }
                out.push(END);
            }
            Value::Dictionary(dict) => Self::encode_dict(dict, out),
        }
    }

    /// Encode `value` and write it to `writer`.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Io`] if the writer fails.
    pub fn encode_to(value: &Value, writer: &mut impl Write) -> Result<usize, EncodeError> {
        let bytes = Self::encode(value);
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Exact size of the encoding of `value`, computed without allocating.
    #[must_use]
    pub fn encoded_len(value: &Value) -> usize {
        match value {
            Value::Integer(n) => integer_len(*n),
            Value::ByteString(bytes) => length_prefix_len(bytes.len()) + bytes.len(),
            Value::List(items) => 2 + items.iter().map(Self::encoded_len).sum::<usize>(),
            Value::Dictionary(dict) => {
                2 + dict
                    .iter()
                    .map(|(key, value)| {
                        length_prefix_len(key.len()) + key.len() + Self::encoded_len(value)
                    })
                    .sum::<usize>()
            }
        }
    }

    fn encode_dict(dict: &Dict, out: &mut Vec<u8>) {
        out.push(DICTIONARY);
        // Dict iterates in byte-wise ascending key order, which is the
        // canonical wire order.
        for (key, value) in dict {
            write_byte_string(key, out);
            Self::encode_into(value, out);
        }
        out.push(END);
    }
}

fn write_byte_string(bytes: &[u8], out: &mut Vec<u8>) {
    write_length(bytes.len(), out);
    out.extend_from_slice(bytes);
}
