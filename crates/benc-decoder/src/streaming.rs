use benc_types::{Dict, Value};
use benc_wire::marker::{DICTIONARY, END, INTEGER, LIST, MINUS, is_digit};
use benc_wire::number::{read_integer, read_length};
use benc_wire::{SliceSource, WireError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::parser::{check_key, check_string_len, invalid_key};

/// Longest run of number bytes buffered before handing them to the number
/// grammar. Any longer digit run already overflows 64 bits.
const MAX_NUMBER_BYTES: usize = 24;

/// Asynchronous streaming decoder: yields successive documents from one
/// byte stream.
///
/// Documents are self-delimiting, so several can be sent back to back over
/// a socket or pipe without extra framing. The decoder reads exactly one
/// document per call to [`next`](Self::next) and stops at its closing
/// terminator.
///
/// ```text
///   d...e d...e d...e <EOF>
///   └─┬─┘ └─┬─┘ └─┬─┘   └── next() → None
///     │     │     └──────── next() → Some(Ok(doc 3))
///     │     └────────────── next() → Some(Ok(doc 2))
///     └──────────────────── next() → Some(Ok(doc 1))
/// ```
///
/// Parsing uses an explicit stack of open containers instead of recursion,
/// so nesting depth costs heap, not stack, and is bounded by
/// [`DecoderConfig::max_depth`]. Byte-string payloads are read
/// incrementally rather than preallocated from their declared length.
///
/// After an error the stream is finished: the position inside the failed
/// document is unknown, so no further documents can be located.
///
/// # Example
///
/// ```rust,no_run
/// use benc_decoder::StreamingDecoder;
/// use tokio::io::AsyncBufRead;
///
/// async fn read_all(reader: impl AsyncBufRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(doc) = stream.next().await.transpose().unwrap() {
///         // Process each document...
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
  reader: R,
  config: DecoderConfig,
  /// Bytes consumed from the reader since construction.
  offset: usize,
  done: bool,
}

/// An open container on the parse stack.
enum Frame {
  List(Vec<Value>),
  Dict {
    dict: Dict,
    /// Key read but its value not yet complete.
    pending_key: Option<Vec<u8>>,
  },
}

impl Frame {
  fn into_value(self) -> Value {
    match self {
      Self::List(items) => Value::List(items),
      Self::Dict { dict, .. } => Value::Dictionary(dict),
    }
  }
}

impl<R: AsyncBufRead + Unpin> StreamingDecoder<R> {
  /// Create a streaming decoder with the default [`DecoderConfig`].
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self::with_config(reader, DecoderConfig::default())
  }

  #[must_use]
  pub fn with_config(reader: R, config: DecoderConfig) -> Self {
    Self {
      reader,
      config,
      offset: 0,
      done: false,
    }
  }

  /// Bytes consumed from the reader so far.
  #[must_use]
  pub fn offset(&self) -> usize {
    self.offset
  }

  /// Give back the reader, positioned just after the last document read.
  pub fn into_inner(self) -> R {
    self.reader
  }

  /// Read the next document.
  ///
  /// Returns `Some(Ok(doc))` for each complete document, `None` once the
  /// reader is exhausted between documents, and `Some(Err(_))` on any
  /// decode error, after which the stream yields `None`.
  pub async fn next(&mut self) -> Option<Result<Value, DecodeError>> {
    if self.done {
      return None;
    }

    match self.peek().await {
      Ok(None) => {
        self.done = true;
        return None;
      }
      Ok(Some(_)) => {}
      Err(e) => {
        self.done = true;
        return Some(Err(e));
      }
    }

    let result = self.read_document().await;
    if result.is_err() {
      self.done = true;
    }
    Some(result)
  }

  async fn read_document(&mut self) -> Result<Value, DecodeError> {
    match self.peek().await? {
      Some(DICTIONARY) => {}
      found => return Err(DecodeError::NotADictionary { found }),
    }

    let mut stack: Vec<Frame> = Vec::new();

    loop {
      let offset = self.offset;
      let byte = self
        .peek()
        .await?
        .ok_or(WireError::UnexpectedEof { offset })?;

      // Key position inside a dictionary: read the key and go round again.
      if let Some(Frame::Dict {
        dict,
        pending_key: pending @ None,
      }) = stack.last_mut()
      {
        if byte != END {
          if !is_digit(byte) {
            return Err(invalid_key(offset, byte));
          }
          let key = self.read_byte_string().await?;
          check_key(dict, &key, offset, &self.config)?;
          *pending = Some(key);
          continue;
        }
      }

      let completed = match byte {
        END => match stack.pop() {
          Some(Frame::Dict {
            pending_key: Some(_),
            ..
          })
          | None => return Err(DecodeError::UnexpectedTerminator { offset }),
          Some(frame) => {
            self.advance();
            frame.into_value()
          }
        },
        LIST | DICTIONARY => {
          if stack.len() >= self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
              offset,
              limit: self.config.max_depth,
            });
          }
          self.advance();
          stack.push(if byte == LIST {
            Frame::List(Vec::new())
          } else {
            Frame::Dict {
              dict: Dict::new(),
              pending_key: None,
            }
          });
          continue;
        }
        INTEGER => {
          self.advance();
          Value::Integer(self.read_integer().await?)
        }
        b if is_digit(b) => Value::ByteString(self.read_byte_string().await?),
        found => return Err(DecodeError::InvalidMarker { offset, found }),
      };

      match stack.last_mut() {
        None => return Ok(completed),
        Some(Frame::List(items)) => items.push(completed),
        Some(Frame::Dict { dict, pending_key }) => {
          if let Some(key) = pending_key.take() {
            dict.insert(key, completed);
          }
        }
      }
    }
  }

  async fn read_integer(&mut self) -> Result<i64, DecodeError> {
    let base = self.offset;
    let bytes = self.read_number_bytes(END).await?;
    Ok(read_integer(&mut SliceSource::with_offset(&bytes, base))?)
  }

  async fn read_byte_string(&mut self) -> Result<Vec<u8>, DecodeError> {
    let base = self.offset;
    let digits = self.read_number_bytes(b':').await?;
    let len = read_length(&mut SliceSource::with_offset(&digits, base))?;
    check_string_len(len, base, &self.config)?;

    let mut bytes = Vec::new();
    let limit = u64::try_from(len).unwrap_or(u64::MAX);
    let read = (&mut self.reader).take(limit).read_to_end(&mut bytes).await?;
    self.offset += read;
    if read < len {
      return Err(WireError::UnexpectedEof {
        offset: self.offset,
      }
      .into());
    }
    Ok(bytes)
  }

  /// Collect the bytes of a number up to and including `terminator`.
  ///
  /// Collection also stops at the first byte that cannot belong to a
  /// number, at end of input, or after [`MAX_NUMBER_BYTES`]; the number
  /// grammar then reports the exact failure at the right offset.
  async fn read_number_bytes(&mut self, terminator: u8) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::new();
    while let Some(byte) = self.peek().await? {
      self.advance();
      bytes.push(byte);

      let sign = bytes.len() == 1 && byte == MINUS;
      if byte == terminator || !(byte.is_ascii_digit() || sign) || bytes.len() > MAX_NUMBER_BYTES {
        break;
      }
    }
    Ok(bytes)
  }

  async fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
    let buf = self.reader.fill_buf().await?;
    Ok(buf.first().copied())
  }

  fn advance(&mut self) {
    self.reader.consume(1);
    self.offset += 1;
  }
}
