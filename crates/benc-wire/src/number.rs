use crate::error::WireError;
use crate::marker::{END, INTEGER, LENGTH_DELIMITER, MINUS};
use crate::source::ByteSource;

/// Longest decimal rendering of a `u64` (`18446744073709551615`).
const MAX_DECIMAL_DIGITS: usize = 20;

/// Read the body of an integer literal, after its `i` marker has been
/// consumed, up to and including the closing `e`.
///
/// Accepted grammar: `-?(0|[1-9][0-9]*)e`, except `-0`.
///
/// | Input      | Result                          |
/// |------------|---------------------------------|
/// | `0e`       | `Ok(0)`                         |
/// | `-42e`     | `Ok(-42)`                       |
/// | `007e`     | [`WireError::LeadingZero`]      |
/// | `-0e`      | [`WireError::NegativeZero`]     |
/// | `e`, `-e`  | [`WireError::EmptyNumber`]      |
/// | `4x2e`     | [`WireError::InvalidDigit`]     |
///
/// # Errors
///
/// The variants in the table above, plus [`WireError::IntegerOverflow`]
/// outside `i64::MIN..=i64::MAX` and [`WireError::UnexpectedEof`] if the
/// terminator never arrives.
pub fn read_integer<S: ByteSource + ?Sized>(src: &mut S) -> Result<i64, WireError> {
    let start = src.offset();
    let negative = src.peek()? == Some(MINUS);
    if negative {
        src.advance();
    }

    let magnitude = read_unsigned(src, END)?;

    if negative {
        if magnitude == 0 {
            return Err(WireError::NegativeZero { offset: start });
        }
        // 0 - 2^63 is still representable: i64::MIN
        0i64.checked_sub_unsigned(magnitude)
            .ok_or(WireError::IntegerOverflow { offset: start })
    } else {
        i64::try_from(magnitude).map_err(|_| WireError::IntegerOverflow { offset: start })
    }
}

/// Read a byte-string length prefix up to and including the `:` delimiter.
///
/// # Errors
///
/// Same digit rules as [`read_integer`] without a sign. A length that does
/// not fit in `usize` is [`WireError::LengthOverflow`].
pub fn read_length<S: ByteSource + ?Sized>(src: &mut S) -> Result<usize, WireError> {
    let start = src.offset();
    let len = read_unsigned(src, LENGTH_DELIMITER).map_err(|e| match e {
        WireError::IntegerOverflow { offset } => WireError::LengthOverflow { offset },
        other => other,
    })?;
    usize::try_from(len).map_err(|_| WireError::LengthOverflow { offset: start })
}

/// Shared digit loop: `(0|[1-9][0-9]*)` followed by `terminator`.
fn read_unsigned<S: ByteSource + ?Sized>(src: &mut S, terminator: u8) -> Result<u64, WireError> {
    let start = src.offset();
    let mut value: u64 = 0;
    let mut digits = 0usize;

    loop {
        let offset = src.offset();
        let byte = src
            .next_byte()?
            .ok_or(WireError::UnexpectedEof { offset })?;

        if byte == terminator {
            break;
        }
        if !byte.is_ascii_digit() {
            return Err(WireError::InvalidDigit {
                offset,
                found: byte,
            });
        }
        if digits == 1 && value == 0 {
            return Err(WireError::LeadingZero { offset: start });
        }

        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(byte - b'0')))
            .ok_or(WireError::IntegerOverflow { offset: start })?;
        digits += 1;
    }

    if digits == 0 {
        return Err(WireError::EmptyNumber { offset: start });
    }
    Ok(value)
}

/// Append `i<decimal>e` for `value`.
pub fn write_integer(value: i64, out: &mut Vec<u8>) {
    out.push(INTEGER);
    if value < 0 {
        out.push(MINUS);
    }
    push_decimal(value.unsigned_abs(), out);
    out.push(END);
}

/// Append the `<decimal>:` prefix of a byte string of `len` bytes.
pub fn write_length(len: usize, out: &mut Vec<u8>) {
    push_decimal(len as u64, out);
    out.push(LENGTH_DELIMITER);
}

/// Bytes taken by [`write_integer`] for `value`.
#[must_use]
pub fn integer_len(value: i64) -> usize {
    // marker + terminator + optional sign
    2 + usize::from(value < 0) + decimal_digits(value.unsigned_abs())
}

/// Bytes taken by [`write_length`] for `len`.
#[must_use]
pub fn length_prefix_len(len: usize) -> usize {
    decimal_digits(len as u64) + 1
}

fn decimal_digits(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}

#[allow(clippy::cast_possible_truncation)]
fn push_decimal(mut value: u64, out: &mut Vec<u8>) {
    let mut buf = [0u8; MAX_DECIMAL_DIGITS];
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    out.extend_from_slice(&buf[i..]);
}
