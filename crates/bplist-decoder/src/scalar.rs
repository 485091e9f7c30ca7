use bplist_types::Value;
use bplist_wire::marker::{low_nibble, marker_byte};
use bplist_wire::sized_int::{read_self_sized_int, read_sized_int};

use crate::error::DecodeError;

/// `0x00` null, `0x08` false, `0x09` true. Fill (`0x0F`) and every other
/// `0x0n` byte is rejected.
pub(crate) fn extract_simple(offset: usize, marker: u8) -> Result<Value, DecodeError> {
    match marker {
        marker_byte::NULL => Ok(Value::Null),
        marker_byte::FALSE => Ok(Value::Bool(false)),
        marker_byte::TRUE => Ok(Value::Bool(true)),
        _ => Err(DecodeError::InvalidSimpleValue { offset, marker }),
    }
}

/// Integer object: a self-sized int at the marker.
///
/// Narrow widths are unsigned magnitudes and never sign-extended; only the
/// 8-byte width reinterprets the top bit as a sign. `0x10 0xFF` is 255 while
/// `0x13 0xFF..0xFF` is -1.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn extract_int(buf: &[u8], offset: usize) -> Result<Value, DecodeError> {
    let (raw, _) = read_self_sized_int(buf, offset)?;
    Ok(Value::Int(raw as i64))
}

/// Real object: 4-byte `f32` (widened) or 8-byte `f64`, big-endian bits.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn extract_real(buf: &[u8], offset: usize, marker: u8) -> Result<Value, DecodeError> {
    let width = 1usize << low_nibble(marker);
    let payload = offset + 1;

    match width {
        4 => {
            let bits = read_sized_int(buf, payload, 4)? as u32;
            Ok(Value::Real(f64::from(f32::from_bits(bits))))
        }
        8 => {
            let bits = read_sized_int(buf, payload, 8)?;
            Ok(Value::Real(f64::from_bits(bits)))
        }
        _ => Err(DecodeError::UnsupportedRealWidth { offset, width }),
    }
}

/// Date object: exactly `0x33` followed by an 8-byte big-endian `f64`.
pub(crate) fn extract_date(buf: &[u8], offset: usize, marker: u8) -> Result<Value, DecodeError> {
    if marker != marker_byte::DATE {
        return Err(DecodeError::InvalidDateMarker { offset, marker });
    }
    let bits = read_sized_int(buf, offset + 1, 8)?;
    Ok(Value::Date(f64::from_bits(bits)))
}
