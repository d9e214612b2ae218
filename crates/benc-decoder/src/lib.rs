#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod observer;
pub mod streaming;

mod parser;

pub use config::{DecoderConfig, DuplicateKeys};
pub use decoder::BencDecoder;
pub use error::{DecodeError, ErrorKind};
pub use observer::{DecodeObserver, LogObserver};
pub use streaming::StreamingDecoder;
