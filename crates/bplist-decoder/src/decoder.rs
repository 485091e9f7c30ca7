use bplist_types::Value;
use bplist_wire::Trailer;

use crate::context::DecodeContext;
use crate::error::DecodeError;
use crate::extractor::ObjectExtractor;

/// The result of decoding a binary plist with its container geometry.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ DecodedPlist                                     │
/// │   trailer: Trailer ← widths, count, root index   │
/// │   root:    Value   ← fully materialized tree     │
/// └──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPlist {
    pub trailer: Trailer,
    pub root: Value,
}

/// Synchronous binary plist decoder over a complete in-memory buffer.
///
/// Decoding proceeds in three steps:
///
///   1. **Container**: check the length and `bplist00` magic, parse the
///      32-byte trailer, and validate the width fields and offset table
///      geometry.
///   2. **Root**: extract the trailer's top-level object index.
///   3. **Children**: arrays and dictionaries recursively extract every
///      referenced index. Each index is extracted at most once per call;
///      later references receive a clone of the cached value.
///
/// The buffer is never modified and nothing in the result borrows from it.
/// Any failure aborts the decode; there is no partial result.
///
/// Shared children are copied, and the total number of materialized nodes
/// is bounded by a budget proportional to the input length (at least 2^20).
/// A graph whose copies would exceed it fails with
/// [`DecodeError::NodeLimitExceeded`].
///
/// Recursion depth equals the nesting depth of the tree. A self-referential
/// container graph is not detected and recurses until the stack overflows.
///
/// # Example
///
/// ```rust
/// use bplist_decoder::BplistDecoder;
/// use bplist_types::Value;
///
/// let mut buf = b"bplist00".to_vec();
/// buf.extend_from_slice(&[0x53, b'c', b'a', b't']); // object 0 at offset 8
/// buf.push(0x08); // offset table
/// buf.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 1]);
/// buf.extend_from_slice(&1u64.to_be_bytes()); // object count
/// buf.extend_from_slice(&0u64.to_be_bytes()); // top object
/// buf.extend_from_slice(&12u64.to_be_bytes()); // offset table offset
///
/// assert!(BplistDecoder::is_binary_plist(&buf));
/// assert_eq!(BplistDecoder::decode(&buf).unwrap(), Value::from("cat"));
/// ```
pub struct BplistDecoder;

impl BplistDecoder {
    /// Cheap format sniff: at least 40 bytes and a `bplist00` prefix.
    pub fn is_binary_plist(buf: &[u8]) -> bool {
        bplist_wire::is_binary_plist(buf)
    }

    /// Decode a complete binary plist into its root value.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidContainer`] if the buffer is too short, the
    ///   magic is wrong, or the trailer is inconsistent.
    /// - Any reference, tag, size, encoding, or allocation error raised while
    ///   extracting the object graph.
    pub fn decode(buf: &[u8]) -> Result<Value, DecodeError> {
        Self::decode_document(buf).map(|doc| doc.root)
    }

    /// Decode a complete binary plist, keeping the parsed trailer.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_document(buf: &[u8]) -> Result<DecodedPlist, DecodeError> {
        let ctx = DecodeContext::new(buf)?;
        let trailer = *ctx.trailer();
        tracing::debug!(
            len = buf.len(),
            object_count = trailer.object_count,
            top_object = trailer.top_object,
            offset_int_size = trailer.offset_int_size,
            object_ref_size = trailer.object_ref_size,
            offset_table_offset = trailer.offset_table_offset,
            "binary plist container validated"
        );

        let root = ObjectExtractor::new(&ctx).extract(trailer.top_object)?;
        tracing::debug!(kind = root.kind(), "binary plist decoded");

        Ok(DecodedPlist { trailer, root })
    }
}

/// Free-function form of [`BplistDecoder::is_binary_plist`].
pub fn is_binary_plist(buf: &[u8]) -> bool {
    BplistDecoder::is_binary_plist(buf)
}

/// Free-function form of [`BplistDecoder::decode`].
///
/// # Errors
///
/// Same as [`BplistDecoder::decode`].
pub fn read_binary_plist(buf: &[u8]) -> Result<Value, DecodeError> {
    BplistDecoder::decode(buf)
}
