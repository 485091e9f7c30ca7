#![warn(clippy::pedantic)]

pub mod date;
pub mod value;

pub use date::APPLE_EPOCH_UNIX_OFFSET;
pub use value::{UID_KEY, Value};
