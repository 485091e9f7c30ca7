use bplist_wire::WireError;

/// Errors that can occur while decoding a binary plist.
///
/// Decoding is fail-closed: the first error aborts the whole decode and no
/// partial tree is returned.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── InvalidContainer(WireError) ← too short, bad magic, insane trailer
///   ├── ObjectIndexOutOfRange       ← reference >= object count
///   ├── ObjectOffsetOutOfBounds     ← offset table entry points past the end
///   ├── UnknownMarker               ← unassigned high nibble
///   ├── InvalidSimpleValue          ← 0x0n other than null/false/true
///   ├── InvalidDateMarker           ← 0x3n other than 0x33
///   ├── LengthNotInt                ← explicit length not tagged as int
///   ├── UnsupportedRealWidth        ← real neither 4 nor 8 bytes
///   ├── PayloadOutOfBounds          ← size/count runs past the buffer
///   ├── InvalidAscii                ← byte >= 0x80 in an ASCII string
///   ├── InvalidUtf16                ← unpaired surrogate
///   ├── Allocation                  ← reference buffer reservation failed
///   ├── NodeLimitExceeded           ← shared children expand past the budget
///   └── Wire(WireError)             ← sized-integer reads in the object table
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The header or trailer failed validation.
    ///
    /// The inner [`WireError`] says which check failed: length, magic,
    /// a width field, or the offset table geometry.
    #[error("not a valid binary plist: {0}")]
    InvalidContainer(WireError),

    /// An object reference (or the top-level index) is not below the
    /// object count.
    #[error("object index {index} out of range (object count {object_count})")]
    ObjectIndexOutOfRange { index: u64, object_count: u64 },

    /// The offset table entry for `index` does not address a byte inside
    /// the buffer.
    #[error("object {index} has offset {offset} beyond the {len}-byte buffer")]
    ObjectOffsetOutOfBounds { index: u64, offset: u64, len: usize },

    /// The marker's high nibble is not assigned to any object kind.
    #[error("unknown object marker {marker:#04X} at offset {offset}")]
    UnknownMarker { offset: usize, marker: u8 },

    /// A `0x0n` marker other than null, false or true (fill included).
    #[error("invalid simple value marker {marker:#04X} at offset {offset}")]
    InvalidSimpleValue { offset: usize, marker: u8 },

    /// A `0x3n` marker other than the 8-byte date `0x33`.
    #[error("invalid date marker {marker:#04X} at offset {offset}, expected 0x33")]
    InvalidDateMarker { offset: usize, marker: u8 },

    /// An explicit length (low nibble `0xF`) was followed by a non-int marker.
    #[error("size is not tagged as int: marker {marker:#04X} at offset {offset}")]
    LengthNotInt { offset: usize, marker: u8 },

    /// A real whose width is neither 4 nor 8 bytes.
    #[error("unsupported real width {width} bytes at offset {offset}")]
    UnsupportedRealWidth { offset: usize, width: usize },

    /// A declared size or count whose payload would run past the buffer,
    /// including sizes whose byte length overflows.
    #[error("{kind} payload of {count} units at offset {offset} exceeds the buffer")]
    PayloadOutOfBounds {
        kind: &'static str,
        offset: usize,
        count: u64,
    },

    /// An ASCII string contained a byte outside 7-bit ASCII.
    #[error("invalid ASCII byte {byte:#04X} in string at offset {offset}")]
    InvalidAscii { offset: usize, byte: u8 },

    /// A UTF-16 string was not valid UTF-16 (unpaired surrogate).
    #[error("invalid UTF-16 string at offset {offset}")]
    InvalidUtf16 { offset: usize },

    /// Reserving space for a container's references or children failed.
    #[error("cannot allocate {count} entries for {kind}")]
    Allocation { kind: &'static str, count: u64 },

    /// Copying shared children would materialize more than `limit` nodes.
    ///
    /// The limit scales with the input length, so only containers whose
    /// references fan out far beyond their size reach it.
    #[error("decoded tree exceeds the limit of {limit} nodes")]
    NodeLimitExceeded { limit: u64 },

    /// A wire-level read inside the object or offset table failed.
    #[error(transparent)]
    Wire(#[from] WireError),
}
