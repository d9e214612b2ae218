/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for [`BencDecoder`](crate::BencDecoder) and
/// [`StreamingDecoder`](crate::StreamingDecoder).
///
/// Controls the resource limits applied to untrusted input and the
/// policies for dictionaries that are well-formed but not canonical.
///
/// ```text
/// ┌──────────────────────┬──────────┬────────────────────────────────────────┐
/// │ Field                │ Default  │ Purpose                                │
/// ├──────────────────────┼──────────┼────────────────────────────────────────┤
/// │ max_depth            │ 256      │ Deepest container nesting accepted     │
/// │ max_string_len       │ None     │ Optional cap on declared string length │
/// │ duplicate_keys       │ Reject   │ Reject or keep the last duplicate key  │
/// │ require_sorted_keys  │ false    │ Reject keys not in ascending order     │
/// │ allow_trailing_data  │ false    │ Ignore bytes after the document        │
/// └──────────────────────┴──────────┴────────────────────────────────────────┘
/// ```
///
/// Slice input needs no string cap: a declared length longer than the bytes
/// left is rejected before anything is copied. Readers and streams never
/// preallocate a declared length, so memory follows the bytes that arrive.
/// Set `max_string_len` to bound strings on every source.
///
/// Leading zeros and `-0` are rejected under every configuration: integers
/// and lengths always have exactly one accepted spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum container nesting. The top-level dictionary of a document is
    /// depth 1; a list inside it is depth 2, and so on.
    pub max_depth: usize,

    /// Largest byte-string length accepted from a length prefix, or `None`
    /// for no limit beyond the input itself.
    pub max_string_len: Option<usize>,

    /// What to do when a dictionary repeats a key.
    pub duplicate_keys: DuplicateKeys,

    /// When `true`, every dictionary key must sort strictly after the one
    /// before it, so only canonical dictionaries are accepted.
    pub require_sorted_keys: bool,

    /// When `true`, slice decoding stops after the top-level value and
    /// ignores whatever follows. Reader decoding never consumes past the
    /// document regardless of this flag.
    pub allow_trailing_data: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: None,
            duplicate_keys: DuplicateKeys::Reject,
            require_sorted_keys: false,
            allow_trailing_data: false,
        }
    }
}

impl DecoderConfig {
    /// Canonical-only decoding: default limits plus sorted keys.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            require_sorted_keys: true,
            ..Self::default()
        }
    }
}

/// Policy for a key that appears more than once in one dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Fail with [`DecodeError::DuplicateKey`](crate::DecodeError::DuplicateKey).
    #[default]
    Reject,
    /// Keep the value of the last occurrence.
    LastWins,
}
