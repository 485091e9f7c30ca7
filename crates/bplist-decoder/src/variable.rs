use bplist_types::Value;
use bplist_wire::WireError;
use bplist_wire::marker::{EXPLICIT_LENGTH, high_nibble, low_nibble, marker_byte};
use bplist_wire::sized_int::read_self_sized_int;

use crate::error::DecodeError;

/// Resolve the size/count of a length-bearing object.
///
/// A low nibble below `0xF` is the count itself and the payload starts right
/// after the marker. `0xF` means an int object follows the marker and holds
/// the real count; its own marker must have the int high nibble.
///
/// ```text
/// 0x53 'c' 'a' 't'                     inline: count 3
/// 0x5F 0x10 0x14 <20 bytes>            explicit: count 20, 1-byte int
/// 0x5F 0x11 0x01 0x00 <256 bytes>      explicit: count 256, 2-byte int
/// ```
///
/// # Returns
///
/// `(count, payload_start)`.
pub(crate) fn read_length(
    buf: &[u8],
    offset: usize,
    marker: u8,
) -> Result<(u64, usize), DecodeError> {
    let after_marker = offset + 1;
    let nibble = low_nibble(marker);
    if nibble != EXPLICIT_LENGTH {
        return Ok((u64::from(nibble), after_marker));
    }

    let int_marker = *buf.get(after_marker).ok_or(WireError::UnexpectedEof {
        offset: after_marker,
        needed: 1,
    })?;
    if high_nibble(int_marker) != marker_byte::INT {
        return Err(DecodeError::LengthNotInt {
            offset: after_marker,
            marker: int_marker,
        });
    }

    let (count, consumed) = read_self_sized_int(buf, after_marker)?;
    Ok((count, after_marker + consumed))
}

/// Borrow `count` units of `unit` bytes starting at `start`.
///
/// `count * unit` and `start + len` are both overflow-checked; an overflow is
/// reported the same way as a payload running past the end.
pub(crate) fn payload<'a>(
    buf: &'a [u8],
    kind: &'static str,
    start: usize,
    count: u64,
    unit: usize,
) -> Result<&'a [u8], DecodeError> {
    let end = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(unit))
        .and_then(|len| start.checked_add(len));

    match end {
        Some(end) if end <= buf.len() => Ok(&buf[start..end]),
        _ => Err(DecodeError::PayloadOutOfBounds {
            kind,
            offset: start,
            count,
        }),
    }
}

/// Data object: `count` raw bytes, copied out.
pub(crate) fn extract_data(buf: &[u8], offset: usize, marker: u8) -> Result<Value, DecodeError> {
    let (count, start) = read_length(buf, offset, marker)?;
    let bytes = payload(buf, "data", start, count, 1)?;
    Ok(Value::Data(bytes.to_vec()))
}

/// ASCII string: `count` bytes, each must be 7-bit ASCII.
pub(crate) fn extract_ascii_string(
    buf: &[u8],
    offset: usize,
    marker: u8,
) -> Result<Value, DecodeError> {
    let (count, start) = read_length(buf, offset, marker)?;
    let bytes = payload(buf, "ascii string", start, count, 1)?;

    if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(DecodeError::InvalidAscii {
            offset: start + position,
            byte: bytes[position],
        });
    }

    Ok(Value::String(bytes.iter().copied().map(char::from).collect()))
}

/// UTF-16 string: `count` big-endian code units (`count * 2` bytes).
pub(crate) fn extract_utf16_string(
    buf: &[u8],
    offset: usize,
    marker: u8,
) -> Result<Value, DecodeError> {
    let (count, start) = read_length(buf, offset, marker)?;
    let bytes = payload(buf, "utf-16 string", start, count, 2)?;

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&units)
        .map(Value::String)
        .map_err(|_| DecodeError::InvalidUtf16 { offset })
}

/// UID: a self-sized int at the marker itself (no length rule), surfaced as
/// `{"CF$UID": n}`.
pub(crate) fn extract_uid(buf: &[u8], offset: usize) -> Result<Value, DecodeError> {
    let (n, _) = read_self_sized_int(buf, offset)?;
    Ok(Value::uid(n))
}
