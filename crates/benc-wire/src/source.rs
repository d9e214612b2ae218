use std::io::{BufRead, ErrorKind, Read};

use crate::error::WireError;

/// Cursor over an abstract byte source.
///
/// The grammar only ever needs two primitives: look at the next unread byte
/// without consuming it, and consume a run of bytes whose length is already
/// known. Keeping the cursor behind this trait lets the decoder run over an
/// in-memory slice or any buffered reader with the same code.
///
/// ```text
///   consumed ─────────────┐ offset()
///   ┌───────────────────┬─▼─┬──────────────────────┐
///   │ d 3:cow 3:moo ... │ 4 │ :spam 4:eggs e       │
///   └───────────────────┴───┴──────────────────────┘
///                         ▲ peek()
/// ```
pub trait ByteSource {
    /// Return the next unread byte without consuming it, or `None` at end
    /// of input.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the underlying reader fails.
    fn peek(&mut self) -> Result<Option<u8>, WireError>;

    /// Consume the byte most recently returned by [`peek`](Self::peek).
    ///
    /// Must only be called after `peek` returned `Some`.
    fn advance(&mut self);

    /// Consume exactly `len` bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    /// - [`WireError::Io`] if the underlying reader fails.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError>;

    /// Number of bytes consumed since the source was created.
    fn offset(&self) -> usize;

    /// Number of unread bytes, when the source knows it.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }

    /// Consume and return the next byte, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the underlying reader fails.
    fn next_byte(&mut self) -> Result<Option<u8>, WireError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.advance();
        }
        Ok(byte)
    }
}

/// In-memory source over a borrowed slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Offset of `buf[0]` within the enclosing input.
    base: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    /// A source over `buf` whose reported offsets start at `base`, for
    /// slices cut out of a larger stream.
    #[must_use]
    pub fn with_offset(buf: &'a [u8], base: usize) -> Self {
        Self { buf, pos: 0, base }
    }

    /// The unread tail of the slice.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&mut self) -> Result<Option<u8>, WireError> {
        Ok(self.buf.get(self.pos).copied())
    }

    fn advance(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::UnexpectedEof {
                offset: self.base + self.buf.len(),
            })?;
        let bytes = self.buf[self.pos..end].to_vec();
        self.pos = end;
        Ok(bytes)
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.buf.len() - self.pos)
    }
}

/// Streaming source over any [`BufRead`].
///
/// Byte runs are read incrementally into a growing buffer, so a declared
/// length is never allocated up front: memory use tracks the bytes that
/// actually arrive.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    offset: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Give back the reader. Bytes after the last consumed one are still
    /// available from it.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> ByteSource for ReaderSource<R> {
    fn peek(&mut self) -> Result<Option<u8>, WireError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }
    }

    fn advance(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let mut bytes = Vec::new();
        let limit = u64::try_from(len).unwrap_or(u64::MAX);
        let read = (&mut self.reader).take(limit).read_to_end(&mut bytes)?;
        self.offset += read;
        if read < len {
            return Err(WireError::UnexpectedEof {
                offset: self.offset,
            });
        }
        Ok(bytes)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
