/// Errors raised while reading the fixed parts of a binary plist container:
/// the magic header, the 32-byte trailer, and the sized integers that the
/// offset table and object table are built from.
///
/// Every variant carries the byte offset or raw value that failed, so a
/// corrupt container can be located with a hex dump.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The buffer is smaller than a header plus a trailer (40 bytes).
    #[error("buffer of {len} bytes is too short for a binary plist (minimum {min})")]
    TooShort { len: usize, min: usize },

    /// The first 8 bytes were not `bplist00`.
    #[error("invalid magic: expected \"bplist00\", got {found:02X?}")]
    InvalidMagic { found: [u8; 8] },

    /// A trailer width field was outside `1..=8`.
    #[error("trailer field {field} must be in 1..=8, got {value}")]
    InvalidWidth { field: &'static str, value: u8 },

    /// The offset table starts inside the 8-byte header.
    #[error("offset table offset {offset} overlaps the header")]
    OffsetTableBeforeHeader { offset: u64 },

    /// The offset table does not fit between its start and the trailer.
    #[error(
        "offset table of {object_count} entries x {entry_size} bytes at offset {offset} \
         does not fit in a {len}-byte container"
    )]
    OffsetTableOutOfBounds {
        offset: u64,
        object_count: u64,
        entry_size: u8,
        len: usize,
    },

    /// A read of `needed` bytes starting at `offset` ran past the end of the buffer.
    #[error("unexpected end of input: {needed} bytes needed at offset {offset}")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A self-sized integer declared a width larger than 8 bytes.
    #[error("unsupported integer width {width} bytes at offset {offset}")]
    UnsupportedIntWidth { offset: usize, width: usize },

    /// A fixed-width read was requested with a width outside `1..=8`.
    #[error("sized integer width must be in 1..=8, got {width}")]
    InvalidReadWidth { width: usize },

    /// Offset arithmetic overflowed the address space.
    #[error("offset arithmetic overflowed while computing {what}")]
    Overflow { what: &'static str },
}
