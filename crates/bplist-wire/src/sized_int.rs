use crate::error::WireError;
use crate::marker::LOW_NIBBLE_MASK;

/// Widest integer this reader accepts, in bytes.
///
/// The format can describe 16-byte integers (low nibble 4), but nothing
/// above 8 bytes fits the value model, so those are rejected.
pub const MAX_SIZED_INT_BYTES: usize = 8;

/// Read `size` bytes at `offset` as a big-endian unsigned integer.
///
/// | Bytes                    | Value        |
/// |--------------------------|--------------|
/// | `[0x2A]`                 | 42           |
/// | `[0x01, 0x00]`           | 256          |
/// | `[0xFF; 8]`              | `u64::MAX`   |
///
/// # Errors
///
/// - [`WireError::InvalidReadWidth`] if `size` is not in `1..=8`.
/// - [`WireError::UnexpectedEof`] if `offset + size` runs past the buffer.
/// - [`WireError::Overflow`] if `offset + size` overflows `usize`.
pub fn read_sized_int(buf: &[u8], offset: usize, size: usize) -> Result<u64, WireError> {
    if size == 0 || size > MAX_SIZED_INT_BYTES {
        return Err(WireError::InvalidReadWidth { width: size });
    }

    let end = offset.checked_add(size).ok_or(WireError::Overflow {
        what: "sized integer end",
    })?;
    let bytes = buf.get(offset..end).ok_or(WireError::UnexpectedEof {
        offset,
        needed: size,
    })?;

    Ok(bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
}

/// Read a self-sized integer whose marker byte sits at `offset`.
///
/// The low nibble `n` of the marker gives the payload width `1 << n`; the
/// payload follows the marker immediately. The high nibble is not checked
/// here: int objects, UIDs and explicit lengths all share this layout and
/// each caller validates its own tag.
///
/// # Returns
///
/// `(value, bytes_consumed)`, where `bytes_consumed` includes the marker.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if the marker or payload is past the end.
/// - [`WireError::UnsupportedIntWidth`] if the width exceeds 8 bytes.
pub fn read_self_sized_int(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let marker = *buf
        .get(offset)
        .ok_or(WireError::UnexpectedEof { offset, needed: 1 })?;

    let width = 1usize << (marker & LOW_NIBBLE_MASK);
    if width > MAX_SIZED_INT_BYTES {
        return Err(WireError::UnsupportedIntWidth { offset, width });
    }

    let start = offset.checked_add(1).ok_or(WireError::Overflow {
        what: "self-sized integer payload",
    })?;
    let value = read_sized_int(buf, start, width)?;

    Ok((value, width + 1))
}
