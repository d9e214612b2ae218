/// Low-level grammar errors raised while reading markers, numbers and raw
/// byte runs from a [`ByteSource`](crate::ByteSource).
///
/// Every variant that can be pinned to a position carries `offset`: the
/// number of bytes consumed from the start of the input when the problem
/// was detected. Higher layers (`benc-decoder`) wrap this type and classify
/// it into format, truncation and overflow failures.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a number, terminator or declared byte run was complete.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A byte other than an ASCII digit appeared inside a number.
    #[error("invalid byte {found:#04X} in number at offset {offset}")]
    InvalidDigit { offset: usize, found: u8 },

    /// A number had no digits at all (`ie`, `i-e`, `:`).
    #[error("empty number at offset {offset}")]
    EmptyNumber { offset: usize },

    /// A number other than `0` started with `0`.
    #[error("leading zero in number at offset {offset}")]
    LeadingZero { offset: usize },

    /// The literal `-0`, which has no canonical form.
    #[error("negative zero at offset {offset}")]
    NegativeZero { offset: usize },

    /// The number does not fit in the supported 64-bit width.
    #[error("integer overflow at offset {offset}")]
    IntegerOverflow { offset: usize },

    /// A byte-string length prefix too large to address.
    #[error("length prefix overflow at offset {offset}")]
    LengthOverflow { offset: usize },

    /// I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
