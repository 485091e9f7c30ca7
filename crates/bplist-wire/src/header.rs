use crate::error::WireError;
use crate::trailer::TRAILER_SIZE;

/// Magic number and version: ASCII "bplist00".
/// Compared as raw bytes, never as an integer.
pub const BPLIST_MAGIC: [u8; 8] = *b"bplist00";

/// Total header size in bytes (fixed).
pub const HEADER_SIZE: usize = 8;

/// Smallest buffer that can hold a header and a trailer.
pub const MIN_CONTAINER_SIZE: usize = HEADER_SIZE + TRAILER_SIZE;

/// Cheap format sniff: long enough for a header and trailer, and starts
/// with `bplist00`. Does not look at the trailer.
pub fn is_binary_plist(buf: &[u8]) -> bool {
    buf.len() >= MIN_CONTAINER_SIZE && buf[..HEADER_SIZE] == BPLIST_MAGIC
}

/// Validate the container header.
///
/// The length check runs before the magic check, so a short buffer always
/// reports [`WireError::TooShort`] even when its first bytes are wrong too.
///
/// # Errors
///
/// - [`WireError::TooShort`] if the buffer is under [`MIN_CONTAINER_SIZE`].
/// - [`WireError::InvalidMagic`] if the first 8 bytes are not `bplist00`.
pub fn check_header(buf: &[u8]) -> Result<(), WireError> {
    if buf.len() < MIN_CONTAINER_SIZE {
        return Err(WireError::TooShort {
            len: buf.len(),
            min: MIN_CONTAINER_SIZE,
        });
    }

    if buf[..HEADER_SIZE] != BPLIST_MAGIC {
        let mut found = [0u8; HEADER_SIZE];
        found.copy_from_slice(&buf[..HEADER_SIZE]);
        return Err(WireError::InvalidMagic { found });
    }

    Ok(())
}
