#![warn(clippy::pedantic)]

pub mod builder;
pub mod encoder;
pub mod error;

pub use builder::DictBuilder;
pub use encoder::BencEncoder;
pub use error::EncodeError;
