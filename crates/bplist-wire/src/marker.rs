/// Every object in the object table starts with a one-byte marker.
///
/// The high nibble selects the object kind. The low nibble is kind-specific:
/// the simple value itself, `log2` of an integer or real width, or an inline
/// length/count (with `0xF` meaning an explicit length follows).
///
/// ```text
/// ┌──────────────┬─────────────────┬──────────────────────────────────┐
/// │ Marker       │ Kind            │ Low nibble                       │
/// ├──────────────┼─────────────────┼──────────────────────────────────┤
/// │ 0x00         │ null            │                                  │
/// │ 0x08 / 0x09  │ false / true    │                                  │
/// │ 0x0F         │ fill            │ (not a value)                    │
/// │ 0x1n         │ int             │ width = 1 << n                   │
/// │ 0x2n         │ real            │ width = 1 << n (4 or 8)          │
/// │ 0x33         │ date            │ always 8-byte double             │
/// │ 0x4n         │ data            │ byte count, 0xF = explicit       │
/// │ 0x5n         │ ASCII string    │ byte count, 0xF = explicit       │
/// │ 0x6n         │ UTF-16 string   │ code units, 0xF = explicit       │
/// │ 0x8n         │ UID             │ width = 1 << n                   │
/// │ 0xAn         │ array           │ element count, 0xF = explicit    │
/// │ 0xDn         │ dictionary      │ pair count, 0xF = explicit       │
/// └──────────────┴─────────────────┴──────────────────────────────────┘
/// ```
pub mod marker_byte {
    pub const NULL: u8 = 0x00;
    pub const FALSE: u8 = 0x08;
    pub const TRUE: u8 = 0x09;
    pub const FILL: u8 = 0x0F;
    pub const INT: u8 = 0x10;
    pub const REAL: u8 = 0x20;
    pub const DATE: u8 = 0x33;
    pub const DATA: u8 = 0x40;
    pub const ASCII_STRING: u8 = 0x50;
    pub const UTF16_STRING: u8 = 0x60;
    pub const UID: u8 = 0x80;
    pub const ARRAY: u8 = 0xA0;
    pub const DICTIONARY: u8 = 0xD0;
}

/// Mask selecting the kind bits of a marker.
pub const HIGH_NIBBLE_MASK: u8 = 0xF0;

/// Mask selecting the inline size/value bits of a marker.
pub const LOW_NIBBLE_MASK: u8 = 0x0F;

/// Low-nibble value meaning "the real length follows as an int object".
pub const EXPLICIT_LENGTH: u8 = 0x0F;

/// Kind bits of a marker.
pub fn high_nibble(marker: u8) -> u8 {
    marker & HIGH_NIBBLE_MASK
}

/// Inline size/value bits of a marker.
pub fn low_nibble(marker: u8) -> u8 {
    marker & LOW_NIBBLE_MASK
}

/// The object kind selected by a marker's high nibble.
///
/// This is the single place a marker byte is classified. The decoder
/// dispatches on it and `bplist inspect` uses it to label objects without
/// decoding them. High nibbles with no assigned kind (`0x7`, `0x9`, `0xB`,
/// `0xC`, `0xE`, `0xF`) map to [`ObjectKind::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Null, booleans and fill share high nibble `0x0`.
    Simple,
    Int,
    Real,
    Date,
    Data,
    AsciiString,
    Utf16String,
    Uid,
    Array,
    Dictionary,
    /// The raw high nibble, for diagnostics.
    Unknown(u8),
}

impl ObjectKind {
    /// Classify a marker byte.
    pub fn from_marker(marker: u8) -> Self {
        match high_nibble(marker) {
            0x00 => Self::Simple,
            0x10 => Self::Int,
            0x20 => Self::Real,
            0x30 => Self::Date,
            0x40 => Self::Data,
            0x50 => Self::AsciiString,
            0x60 => Self::Utf16String,
            0x80 => Self::Uid,
            0xA0 => Self::Array,
            0xD0 => Self::Dictionary,
            other => Self::Unknown(other),
        }
    }

    /// Lowercase display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Int => "int",
            Self::Real => "real",
            Self::Date => "date",
            Self::Data => "data",
            Self::AsciiString => "ascii-string",
            Self::Utf16String => "utf16-string",
            Self::Uid => "uid",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Whether the low nibble follows the shared inline/explicit length rule.
    pub fn has_length(self) -> bool {
        matches!(
            self,
            Self::Data | Self::AsciiString | Self::Utf16String | Self::Array | Self::Dictionary
        )
    }
}
