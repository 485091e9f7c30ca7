use bplist_wire::sized_int::read_sized_int;
use bplist_wire::{Trailer, WireError};

use crate::error::DecodeError;

/// Validated view of one container, shared by every extractor in a decode.
///
/// Building a context runs all container-level checks (header, trailer
/// widths, offset table geometry). Once built, the offset table is known to
/// lie entirely inside the buffer, so [`object_offset`](Self::object_offset)
/// only has to check the index and the value it reads.
///
/// ```text
/// ┌──────────┬────────────────┬──────────────────┬──────────┐
/// │ bplist00 │ object table   │ offset table     │ trailer  │
/// │ 8 bytes  │ tagged objects │ count x int_size │ 32 bytes │
/// └──────────┴────────────────┴──────────────────┴──────────┘
///                              ^ offset_table_offset
/// ```
///
/// The context borrows the buffer and never copies it.
#[derive(Clone, Copy, Debug)]
pub struct DecodeContext<'a> {
    buf: &'a [u8],
    trailer: Trailer,
    offset_table_offset: usize,
    offset_int_size: usize,
    object_ref_size: usize,
}

impl<'a> DecodeContext<'a> {
    /// Validate the container and build the context.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidContainer`] wrapping the failed header or
    /// trailer check.
    pub fn new(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let trailer = Trailer::read_from(buf).map_err(DecodeError::InvalidContainer)?;

        // The trailer check bounds the table by buf.len(), so this only fails
        // on targets where usize is narrower than the checked u64 value.
        let offset_table_offset = usize::try_from(trailer.offset_table_offset).map_err(|_| {
            DecodeError::InvalidContainer(WireError::OffsetTableOutOfBounds {
                offset: trailer.offset_table_offset,
                object_count: trailer.object_count,
                entry_size: trailer.offset_int_size,
                len: buf.len(),
            })
        })?;

        Ok(Self {
            buf,
            trailer,
            offset_table_offset,
            offset_int_size: usize::from(trailer.offset_int_size),
            object_ref_size: usize::from(trailer.object_ref_size),
        })
    }

    /// The whole container.
    pub fn bytes(&self) -> &'a [u8] {
        self.buf
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn trailer(&self) -> &Trailer {
        &self.trailer
    }

    pub fn object_count(&self) -> u64 {
        self.trailer.object_count
    }

    /// Width in bytes of each reference in an array or dictionary.
    pub fn object_ref_size(&self) -> usize {
        self.object_ref_size
    }

    /// Check that `index` names a slot in the offset table.
    ///
    /// # Errors
    ///
    /// [`DecodeError::ObjectIndexOutOfRange`] if `index >= object_count`.
    pub fn check_index(&self, index: u64) -> Result<(), DecodeError> {
        if index >= self.trailer.object_count {
            return Err(DecodeError::ObjectIndexOutOfRange {
                index,
                object_count: self.trailer.object_count,
            });
        }
        Ok(())
    }

    /// Byte offset of object `index`, read from the offset table.
    ///
    /// The returned offset is guaranteed to address a byte inside the
    /// buffer, so the caller can read the marker byte directly.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::ObjectIndexOutOfRange`] if `index >= object_count`.
    /// - [`DecodeError::ObjectOffsetOutOfBounds`] if the entry points at or
    ///   past the end of the buffer.
    pub fn object_offset(&self, index: u64) -> Result<usize, DecodeError> {
        self.check_index(index)?;

        let entry = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(self.offset_int_size))
            .and_then(|rel| rel.checked_add(self.offset_table_offset))
            .ok_or(WireError::Overflow {
                what: "offset table entry",
            })?;
        let offset = read_sized_int(self.buf, entry, self.offset_int_size)?;

        usize::try_from(offset)
            .ok()
            .filter(|&offset| offset < self.buf.len())
            .ok_or(DecodeError::ObjectOffsetOutOfBounds {
                index,
                offset,
                len: self.buf.len(),
            })
    }
}
