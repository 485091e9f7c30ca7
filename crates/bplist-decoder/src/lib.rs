#![warn(clippy::pedantic)]

pub mod context;
pub mod decoder;
pub mod error;

mod container;
mod extractor;
mod scalar;
mod variable;

#[cfg(test)]
mod test_support;

pub use context::DecodeContext;
pub use decoder::{BplistDecoder, DecodedPlist, is_binary_plist, read_binary_plist};
pub use error::DecodeError;
