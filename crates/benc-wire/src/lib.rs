#![warn(clippy::pedantic)]

pub mod error;
pub mod marker;
pub mod number;
pub mod source;

pub use error::WireError;
pub use source::{ByteSource, ReaderSource, SliceSource};
