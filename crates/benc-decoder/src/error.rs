use benc_types::ValueKind;
use benc_wire::WireError;

/// Errors that can occur while decoding a document.
///
/// Every failure aborts the whole decode: there is no partial recovery and
/// no value is returned alongside an error. Variants carry the byte offset
/// (bytes consumed from the start of the input) where the problem was
/// detected.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── NotADictionary        ← document does not start with 'd'
///   ├── UnexpectedTerminator  ← 'e' where a value was expected
///   ├── InvalidMarker         ← byte that starts no value
///   ├── InvalidKey            ← dictionary key is not a byte string
///   ├── DuplicateKey          ← key repeated (DuplicateKeys::Reject)
///   ├── UnsortedKey           ← key out of order (require_sorted_keys)
///   ├── DepthExceeded         ← nesting deeper than max_depth
///   ├── StringTooLarge        ← declared length above max_string_len
///   ├── LengthExceedsInput    ← declared length above remaining input
///   ├── TrailingData          ← bytes after the top-level value
///   ├── Wire(WireError)       ← number grammar, EOF, from benc-wire
///   └── Io(std::io::Error)    ← from the underlying async reader
/// ```
///
/// Use [`kind`](Self::kind) to branch on the broad failure class instead of
/// matching individual variants.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The document's first byte is not the dictionary marker.
    ///
    /// `found` is `None` when the input is empty.
    #[error("document must start with a dictionary, found {}", describe_byte(*found))]
    NotADictionary { found: Option<u8> },

    /// A terminator appeared where a value was expected.
    #[error("unexpected terminator at offset {offset}")]
    UnexpectedTerminator { offset: usize },

    /// The byte at `offset` cannot start any value.
    #[error("invalid marker {found:#04X} at offset {offset}")]
    InvalidMarker { offset: usize, found: u8 },

    /// A dictionary key position held something other than a byte string.
    #[error("dictionary key at offset {offset} is a {found}, expected a byte string")]
    InvalidKey { offset: usize, found: ValueKind },

    /// The same key appeared twice in one dictionary.
    #[error("duplicate dictionary key {} at offset {offset}", String::from_utf8_lossy(key))]
    DuplicateKey { offset: usize, key: Vec<u8> },

    /// A key did not sort strictly after its predecessor.
    #[error("dictionary key {} at offset {offset} is out of order", String::from_utf8_lossy(key))]
    UnsortedKey { offset: usize, key: Vec<u8> },

    /// Containers nested deeper than the configured limit.
    #[error("nesting depth exceeds limit {limit} at offset {offset}")]
    DepthExceeded { offset: usize, limit: usize },

    /// A byte string declared a length above the configured limit.
    #[error("byte string of {len} bytes at offset {offset} exceeds limit {limit}")]
    StringTooLarge {
        offset: usize,
        len: usize,
        limit: usize,
    },

    /// A byte string declared more bytes than the input has left.
    #[error("byte string at offset {offset} declares {len} bytes, only {remaining} remain")]
    LengthExceedsInput {
        offset: usize,
        len: usize,
        remaining: usize,
    },

    /// Extra bytes followed a complete top-level value.
    #[error("unexpected data after document ({extra_bytes} bytes)")]
    TrailingData { extra_bytes: usize },

    /// A number, delimiter or byte run failed at the wire level.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the underlying reader (streaming decoder).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Broad failure classes of [`DecodeError`].
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────────┐
/// │ Kind           │ Variants                                             │
/// ├────────────────┼──────────────────────────────────────────────────────┤
/// │ Format         │ NotADictionary, UnexpectedTerminator, InvalidMarker, │
/// │                │ InvalidKey, DuplicateKey, UnsortedKey, TrailingData, │
/// │                │ Wire(InvalidDigit | EmptyNumber | LeadingZero |      │
/// │                │      NegativeZero | LengthOverflow)                  │
/// │ TruncatedInput │ LengthExceedsInput, Wire(UnexpectedEof),             │
/// │                │ Io(UnexpectedEof)                                    │
/// │ DepthExceeded  │ DepthExceeded                                        │
/// │ IntegerOverflow│ Wire(IntegerOverflow)                                │
/// │ LimitExceeded  │ StringTooLarge                                       │
/// │ Io             │ any other I/O failure                                │
/// └────────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    TruncatedInput,
    DepthExceeded,
    IntegerOverflow,
    LimitExceeded,
    Io,
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotADictionary { .. }
            | Self::UnexpectedTerminator { .. }
            | Self::InvalidMarker { .. }
            | Self::InvalidKey { .. }
            | Self::DuplicateKey { .. }
            | Self::UnsortedKey { .. }
            | Self::TrailingData { .. } => ErrorKind::Format,
            Self::LengthExceedsInput { .. } => ErrorKind::TruncatedInput,
            Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            Self::StringTooLarge { .. } => ErrorKind::LimitExceeded,
            Self::Wire(wire) => match wire {
                WireError::UnexpectedEof { .. } => ErrorKind::TruncatedInput,
                WireError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
                WireError::InvalidDigit { .. }
                | WireError::EmptyNumber { .. }
                | WireError::LengthOverflow { .. }
                | WireError::LeadingZero { .. }
                | WireError::NegativeZero { .. } => ErrorKind::Format,
                WireError::Io(e) => io_kind(e),
            },
            Self::Io(e) => io_kind(e),
        }
    }
}

fn io_kind(e: &std::io::Error) -> ErrorKind {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ErrorKind::TruncatedInput
    } else {
        ErrorKind::Io
    }
}

fn describe_byte(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("{b:#04X}"),
        None => "end of input".to_string(),
    }
}
