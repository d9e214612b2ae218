//! Single-byte markers of the wire grammar.
//!
//! ```text
//!   i<digits>e        integer
//!   <len>:<bytes>     byte string
//!   l<values>e        list
//!   d<pairs>e         dictionary
//! ```

/// Opens an integer literal.
pub const INTEGER: u8 = b'i';

/// Opens a list.
pub const LIST: u8 = b'l';

/// Opens a dictionary.
pub const DICTIONARY: u8 = b'd';

/// Closes an integer, list or dictionary.
pub const END: u8 = b'e';

/// Separates a byte-string length from its payload.
pub const LENGTH_DELIMITER: u8 = b':';

/// Sign prefix of a negative integer.
pub const MINUS: u8 = b'-';

/// Whether `byte` can begin a byte string (its length prefix).
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}
