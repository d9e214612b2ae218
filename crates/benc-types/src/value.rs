use std::fmt;

use crate::dict::Dict;
use crate::error::TypeError;

/// One node of a document tree.
///
/// The model is closed: every encodable shape is one of these four
/// variants, so both the encoder and the decoder dispatch with a single
/// exhaustive `match`.
///
/// ```text
/// ┌────────────────────────┬──────────────────────┐
/// │ Variant                │ Wire form            │
/// ├────────────────────────┼──────────────────────┤
/// │ Integer(-42)           │ i-42e                │
/// │ ByteString(b"spam")    │ 4:spam               │
/// │ List([..])             │ l ... e              │
/// │ Dictionary({..})       │ d key value ... e    │
/// └────────────────────────┴──────────────────────┘
/// ```
///
/// Children are owned exclusively by their parent; a tree has no sharing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i64),
    ByteString(Vec<u8>),
    List(Vec<Value>),
    Dictionary(Dict),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    ByteString,
    List,
    Dictionary,
}

impl ValueKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::ByteString => "byte string",
            Self::List => "list",
            Self::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::ByteString(_) => ValueKind::ByteString,
            Self::List(_) => ValueKind::List,
            Self::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// The byte string as text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up `key` when this value is a dictionary.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_dict().and_then(|d| d.get(key))
    }
}

// ── Construction: integers ──────────────────────────────────────────────────
//
// Every native width is normalized to the single i64 representation here,
// before any encoding happens. Widths that always fit convert with `From`;
// the rest go through `TryFrom` and fail instead of truncating.

macro_rules! from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Integer(i64::from(n))
                }
            }
        )*
    };
}

macro_rules! try_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = TypeError;

                fn try_from(n: $t) -> Result<Self, Self::Error> {
                    i64::try_from(n)
                        .map(Self::Integer)
                        .map_err(|_| TypeError::IntegerOverflow { value: n.to_string() })
                }
            }
        )*
    };
}

from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);
try_from_wide_int!(u64, usize, isize, i128, u128);

// ── Construction: strings and containers ────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::ByteString(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::ByteString(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Self::ByteString(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::ByteString(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Self::Dictionary(dict)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

// ── Extraction ──────────────────────────────────────────────────────────────

impl TryFrom<Value> for i64 {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(n) => Ok(n),
            other => Err(mismatch(ValueKind::Integer, &other)),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ByteString(bytes) => Ok(bytes),
            other => Err(mismatch(ValueKind::ByteString, &other)),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(mismatch(ValueKind::List, &other)),
        }
    }
}

impl TryFrom<Value> for Dict {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Dictionary(dict) => Ok(dict),
            other => Err(mismatch(ValueKind::Dictionary, &other)),
        }
    }
}

fn mismatch(expected: ValueKind, found: &Value) -> TypeError {
    TypeError::KindMismatch {
        expected,
        found: found.kind(),
    }
}

// ── Display ─────────────────────────────────────────────────────────────────

/// Compact one-line rendering for diagnostics and snapshots.
///
/// Byte strings print as quoted text when they are valid UTF-8 and as
/// `0x`-prefixed hex otherwise:
///
/// ```text
/// {"info": {"length": 42, "pieces": 0x00ff}, "tags": ["a", "b"]}
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::ByteString(bytes) => write_bytes(f, bytes),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dictionary(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_bytes(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(text) => write!(f, "{text:?}"),
        Err(_) => {
            f.write_str("0x")?;
            for byte in bytes {
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }
}
