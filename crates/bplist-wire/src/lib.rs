#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod marker;
pub mod sized_int;
pub mod trailer;

pub use error::WireError;
pub use header::is_binary_plist;
pub use marker::ObjectKind;
pub use trailer::Trailer;
