use crate::error::WireError;
use crate::header::{HEADER_SIZE, check_header};

/// Total trailer size in bytes (fixed).
pub const TRAILER_SIZE: usize = 32;

/// Unused bytes at the start of the trailer.
const TRAILER_RESERVED: usize = 6;

/// Allowed range for both trailer width fields.
const WIDTH_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

/// Binary plist trailer: the last 32 bytes of every container.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 6 bytes │ Reserved (ignored)                       │
/// │ 0x06   │ 1 byte  │ Offset table entry width (1..=8)         │
/// │ 0x07   │ 1 byte  │ Object reference width (1..=8)           │
/// │ 0x08   │ 8 bytes │ Object count (u64 BE)                    │
/// │ 0x10   │ 8 bytes │ Top-level object index (u64 BE)          │
/// │ 0x18   │ 8 bytes │ Offset table byte offset (u64 BE)        │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trailer {
    pub offset_int_size: u8,
    pub object_ref_size: u8,
    pub object_count: u64,
    /// An object index, not a byte offset.
    pub top_object: u64,
    pub offset_table_offset: u64,
}

impl Trailer {
    /// Parse and sanity-check the trailer of a complete container.
    ///
    /// Checks run in this order: header (length and magic), width fields,
    /// offset table start, then offset table extent. The extent check is
    /// `offset_int_size * object_count + offset_table_offset + 32 <= len`,
    /// computed with checked arithmetic so a huge `object_count` cannot wrap
    /// around and pass.
    ///
    /// # Errors
    ///
    /// - [`WireError::TooShort`] / [`WireError::InvalidMagic`] from the header.
    /// - [`WireError::InvalidWidth`] if either width field is outside `1..=8`.
    /// - [`WireError::OffsetTableBeforeHeader`] if the table starts before byte 8.
    /// - [`WireError::OffsetTableOutOfBounds`] if the table overruns the trailer
    ///   or the extent computation overflows.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        check_header(buf)?;

        let raw = &buf[buf.len() - TRAILER_SIZE..];
        let offset_int_size = raw[TRAILER_RESERVED];
        let object_ref_size = raw[TRAILER_RESERVED + 1];
        let object_count = be_u64(&raw[8..16]);
        let top_object = be_u64(&raw[16..24]);
        let offset_table_offset = be_u64(&raw[24..32]);

        if !WIDTH_RANGE.contains(&offset_int_size) {
            return Err(WireError::InvalidWidth {
                field: "offset_int_size",
                value: offset_int_size,
            });
        }
        if !WIDTH_RANGE.contains(&object_ref_size) {
            return Err(WireError::InvalidWidth {
                field: "object_ref_size",
                value: object_ref_size,
            });
        }

        if offset_table_offset < HEADER_SIZE as u64 {
            return Err(WireError::OffsetTableBeforeHeader {
                offset: offset_table_offset,
            });
        }

        let trailer = Self {
            offset_int_size,
            object_ref_size,
            object_count,
            top_object,
            offset_table_offset,
        };

        let out_of_bounds = WireError::OffsetTableOutOfBounds {
            offset: offset_table_offset,
            object_count,
            entry_size: offset_int_size,
            len: buf.len(),
        };
        let end = trailer
            .offset_table_len()
            .and_then(|table| table.checked_add(offset_table_offset))
            .and_then(|end| end.checked_add(TRAILER_SIZE as u64));
        match end {
            Some(end) if end <= buf.len() as u64 => Ok(trailer),
            _ => Err(out_of_bounds),
        }
    }

    /// Byte length of the offset table, or `None` on overflow.
    pub fn offset_table_len(&self) -> Option<u64> {
        u64::from(self.offset_int_size).checked_mul(self.object_count)
    }

    /// Serialize the trailer into its 32-byte wire form.
    ///
    /// Used by fixture builders; the reserved bytes are written as zero.
    pub fn to_bytes(&self) -> [u8; TRAILER_SIZE] {
        let mut out = [0u8; TRAILER_SIZE];
        out[TRAILER_RESERVED] = self.offset_int_size;
        out[TRAILER_RESERVED + 1] = self.object_ref_size;
        out[8..16].copy_from_slice(&self.object_count.to_be_bytes());
        out[16..24].copy_from_slice(&self.top_object.to_be_bytes());
        out[24..32].copy_from_slice(&self.offset_table_offset.to_be_bytes());
        out
    }
}

fn be_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    u64::from_be_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::BPLIST_MAGIC;

    // "bplist00" + [0x53 'c' 'a' 't'] + offset table [0x08] + trailer
    fn cat_container(trailer: &Trailer) -> Vec<u8> {
        let mut buf = BPLIST_MAGIC.to_vec();
        buf.extend_from_slice(&[0x53, b'c', b'a', b't']);
        buf.push(0x08);
        buf.extend_from_slice(&trailer.to_bytes());
        buf
    }

    fn cat_trailer() -> Trailer {
        Trailer {
            offset_int_size: 1,
            object_ref_size: 1,
            object_count: 1,
            top_object: 0,
            offset_table_offset: 12,
        }
    }

    #[test]
    fn parses_minimal_container() {
        let buf = cat_container(&cat_trailer());
        assert_eq!(buf.len(), 45);
        assert_eq!(Trailer::read_from(&buf).unwrap(), cat_trailer());
    }

    #[test]
    fn reserved_bytes_are_ignored() {
        let mut buf = cat_container(&cat_trailer());
        let start = buf.len() - TRAILER_SIZE;
        buf[start..start + 6].copy_from_slice(&[0xAA; 6]);
        assert_eq!(Trailer::read_from(&buf).unwrap(), cat_trailer());
    }

    #[test]
    fn field_layout() {
        let bytes = Trailer {
            offset_int_size: 2,
            object_ref_size: 4,
            object_count: 0x0102,
            top_object: 7,
            offset_table_offset: 0x1000,
        }
        .to_bytes();
        assert_eq!(bytes[6], 2);
        assert_eq!(bytes[7], 4);
        assert_eq!(&bytes[14..16], &[0x01, 0x02]);
        assert_eq!(bytes[23], 7);
        assert_eq!(&bytes[30..32], &[0x10, 0x00]);
    }

    #[test]
    fn rejects_out_of_range_widths() {
        for bad in [0u8, 9, 0xFF] {
            let buf = cat_container(&Trailer {
                offset_int_size: bad,
                ..cat_trailer()
            });
            assert!(matches!(
                Trailer::read_from(&buf),
                Err(WireError::InvalidWidth { field: "offset_int_size", value }) if value == bad
            ));

            let buf = cat_container(&Trailer {
                object_ref_size: bad,
                ..cat_trailer()
            });
            assert!(matches!(
                Trailer::read_from(&buf),
                Err(WireError::InvalidWidth { field: "object_ref_size", value }) if value == bad
            ));
        }
    }

    #[test]
    fn rejects_offset_table_inside_header() {
        let buf = cat_container(&Trailer {
            offset_table_offset: 7,
            ..cat_trailer()
        });
        assert!(matches!(
            Trailer::read_from(&buf),
            Err(WireError::OffsetTableBeforeHeader { offset: 7 })
        ));
    }

    #[test]
    fn rejects_offset_table_overlapping_trailer() {
        let buf = cat_container(&Trailer {
            object_count: 2,
            ..cat_trailer()
        });
        assert!(matches!(
            Trailer::read_from(&buf),
            Err(WireError::OffsetTableOutOfBounds { object_count: 2, .. })
        ));
    }

    #[test]
    fn rejects_overflowing_object_count() {
        let buf = cat_container(&Trailer {
            offset_int_size: 8,
            object_count: u64::MAX / 4,
            ..cat_trailer()
        });
        assert!(matches!(
            Trailer::read_from(&buf),
            Err(WireError::OffsetTableOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_table_offset() {
        let buf = cat_container(&Trailer {
            offset_table_offset: u64::MAX - 4,
            ..cat_trailer()
        });
        assert!(matches!(
            Trailer::read_from(&buf),
            Err(WireError::OffsetTableOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_bad_magic_before_trailer() {
        let mut buf = cat_container(&cat_trailer());
        buf[0] = b'X';
        assert!(matches!(
            Trailer::read_from(&buf),
            Err(WireError::InvalidMagic { .. })
        ));
    }
}
