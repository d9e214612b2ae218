#![warn(clippy::pedantic)]

pub mod dict;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod value;

pub use dict::Dict;
pub use error::TypeError;
pub use value::{Value, ValueKind};
