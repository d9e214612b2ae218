/// Errors that can occur while writing an encoded value to a sink.
///
/// Encoding itself cannot fail: the value model is closed and every tree
/// has a canonical form. The only failure left is the destination refusing
/// bytes.
///
/// ```text
///   EncodeError
///   └── Io(std::io::Error)   ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
