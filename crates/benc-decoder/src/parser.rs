use benc_types::{Dict, Value, ValueKind};
use benc_wire::marker::{DICTIONARY, END, INTEGER, LIST, is_digit};
use benc_wire::number::{read_integer, read_length};
use benc_wire::{ByteSource, WireError};

use crate::config::{DecoderConfig, DuplicateKeys};
use crate::error::DecodeError;
use crate::observer::DecodeObserver;

/// Recursive-descent parser over a [`ByteSource`].
///
/// Each `parse_*` method consumes exactly the bytes of one value: a length
/// prefix plus that many bytes for strings, or everything up to the
/// matching terminator for integers and containers. Nothing past that
/// boundary is ever read, so the source is left positioned at the next
/// value.
pub(crate) struct Parser<'a, S, O: ?Sized> {
    src: S,
    config: &'a DecoderConfig,
    observer: &'a mut O,
    /// Number of currently open containers.
    depth: usize,
}

impl<'a, S: ByteSource, O: DecodeObserver + ?Sized> Parser<'a, S, O> {
    pub(crate) fn new(src: S, config: &'a DecoderConfig, observer: &'a mut O) -> Self {
        Self {
            src,
            config,
            observer,
            depth: 0,
        }
    }

    pub(crate) fn source(&self) -> &S {
        &self.src
    }

    /// Parse a whole document: a value that must be a dictionary.
    pub(crate) fn parse_document(&mut self) -> Result<Value, DecodeError> {
        match self.src.peek()? {
            Some(DICTIONARY) => self.parse_value(),
            found => Err(DecodeError::NotADictionary { found }),
        }
    }

    /// Parse one value of any kind, dispatching on its first byte.
    pub(crate) fn parse_value(&mut self) -> Result<Value, DecodeError> {
        let offset = self.src.offset();
        match self.src.peek()? {
            None => Err(WireError::UnexpectedEof { offset }.into()),
            Some(b) if is_digit(b) => {
                let bytes = self.parse_byte_string()?;
                self.observer
                    .on_leaf(ValueKind::ByteString, self.depth + 1, offset);
                Ok(Value::ByteString(bytes))
            }
            Some(INTEGER) => {
                self.src.advance();
                let n = read_integer(&mut self.src)?;
                self.observer
                    .on_leaf(ValueKind::Integer, self.depth + 1, offset);
                Ok(Value::Integer(n))
            }
            Some(LIST) => self.parse_list(),
            Some(DICTIONARY) => self.parse_dict(),
            Some(END) => Err(DecodeError::UnexpectedTerminator { offset }),
            Some(found) => Err(DecodeError::InvalidMarker { offset, found }),
        }
    }

    fn parse_list(&mut self) -> Result<Value, DecodeError> {
        self.enter(ValueKind::List)?;

        let mut items = Vec::new();
        while self.src.peek()? != Some(END) {
            items.push(self.parse_value()?);
        }

        self.leave(ValueKind::List);
        Ok(Value::List(items))
    }

    fn parse_dict(&mut self) -> Result<Value, DecodeError> {
        self.enter(ValueKind::Dictionary)?;

        let mut dict = Dict::new();
        loop {
            let offset = self.src.offset();
            match self.src.peek()? {
                Some(END) => break,
                Some(b) if is_digit(b) => {}
                Some(found) => return Err(invalid_key(offset, found)),
                None => return Err(WireError::UnexpectedEof { offset }.into()),
            }

            let key = self.parse_byte_string()?;
            check_key(&dict, &key, offset, self.config)?;
            let value = self.parse_value()?;
            dict.insert(key, value);
        }

        self.leave(ValueKind::Dictionary);
        Ok(Value::Dictionary(dict))
    }

    /// `<length>:<bytes>`, with the declared length checked against the
    /// remaining input (when known) and the configured limit before any
    /// bytes are read.
    fn parse_byte_string(&mut self) -> Result<Vec<u8>, DecodeError> {
        let offset = self.src.offset();
        let len = read_length(&mut self.src)?;

        if let Some(remaining) = self.src.remaining_hint() {
            if len > remaining {
                return Err(DecodeError::LengthExceedsInput {
                    offset,
                    len,
                    remaining,
                });
            }
        }
        check_string_len(len, offset, self.config)?;

        Ok(self.src.read_bytes(len)?)
    }

    /// Consume a container's opening marker, enforcing the depth limit.
    fn enter(&mut self, kind: ValueKind) -> Result<(), DecodeError> {
        let offset = self.src.offset();
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                offset,
                limit: self.config.max_depth,
            });
        }
        self.src.advance();
        self.depth += 1;
        self.observer.on_enter(kind, self.depth, offset);
        Ok(())
    }

    /// Consume a container's terminator. The caller has peeked it.
    fn leave(&mut self, kind: ValueKind) {
        self.src.advance();
        self.observer.on_exit(kind, self.depth, self.src.offset());
        self.depth -= 1;
    }
}

/// Apply the duplicate and ordering policies to a key about to be inserted.
pub(crate) fn check_key(
    dict: &Dict,
    key: &[u8],
    offset: usize,
    config: &DecoderConfig,
) -> Result<(), DecodeError> {
    if config.duplicate_keys == DuplicateKeys::Reject && dict.contains_key(key) {
        return Err(DecodeError::DuplicateKey {
            offset,
            key: key.to_vec(),
        });
    }
    if config.require_sorted_keys && dict.last_key().is_some_and(|last| key <= last) {
        return Err(DecodeError::UnsortedKey {
            offset,
            key: key.to_vec(),
        });
    }
    Ok(())
}

pub(crate) fn check_string_len(
    len: usize,
    offset: usize,
    config: &DecoderConfig,
) -> Result<(), DecodeError> {
    match config.max_string_len {
        Some(limit) if len > limit => Err(DecodeError::StringTooLarge { offset, len, limit }),
        _ => Ok(()),
    }
}

/// Error for a non-digit byte in key position.
pub(crate) fn invalid_key(offset: usize, found: u8) -> DecodeError {
    let kind = match found {
        INTEGER => ValueKind::Integer,
        LIST => ValueKind::List,
        DICTIONARY => ValueKind::Dictionary,
        END => return DecodeError::UnexpectedTerminator { offset },
        _ => return DecodeError::InvalidMarker { offset, found },
    };
    DecodeError::InvalidKey {
        offset,
        found: kind,
    }
}
