use benc_types::ValueKind;

use crate::error::DecodeError;

/// Side-channel hook for watching a decode as it happens.
///
/// The plain entry points ([`BencDecoder::decode`](crate::BencDecoder::decode)
/// and friends) run with a no-op observer; pass one to
/// [`BencDecoder::decode_observed`](crate::BencDecoder::decode_observed) to
/// trace traversal. Observers see events but cannot influence parsing.
///
/// `depth` is the nesting level of the node the event is about: the
/// top-level dictionary of a document is depth 1, its direct children
/// depth 2.
pub trait DecodeObserver {
    /// A list or dictionary opened at `offset`.
    fn on_enter(&mut self, _kind: ValueKind, _depth: usize, _offset: usize) {}

    /// A list or dictionary closed; `offset` is just past its terminator.
    fn on_exit(&mut self, _kind: ValueKind, _depth: usize, _offset: usize) {}

    /// An integer or byte string starting at `offset` was read.
    fn on_leaf(&mut self, _kind: ValueKind, _depth: usize, _offset: usize) {}

    /// The decode failed. Called once, with the error about to be returned.
    fn on_error(&mut self, _error: &DecodeError) {}
}

/// Observer that ignores every event.
pub(crate) struct NoObserver;

impl DecodeObserver for NoObserver {}

/// Observer that forwards events to the `log` facade.
///
/// Traversal events are emitted at `trace` level, failures at `debug`.
/// Nothing is printed unless the host installs a logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl DecodeObserver for LogObserver {
    fn on_enter(&mut self, kind: ValueKind, depth: usize, offset: usize) {
        log::trace!("enter {kind} depth={depth} offset={offset}");
    }

    fn on_exit(&mut self, kind: ValueKind, depth: usize, offset: usize) {
        log::trace!("exit {kind} depth={depth} offset={offset}");
    }

    fn on_leaf(&mut self, kind: ValueKind, depth: usize, offset: usize) {
        log::trace!("{kind} depth={depth} offset={offset}");
    }

    fn on_error(&mut self, error: &DecodeError) {
        log::debug!("decode failed: {error}");
    }
}
