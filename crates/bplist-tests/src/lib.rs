//! Fixture writer for binary plist tests and benches.
//!
//! [`PlistBuilder`] appends pre-encoded objects to an object table and
//! returns each object's index, so fixtures are written bottom-up: leaves
//! first, then the containers that reference them.
//!
//! ```text
//! let mut b = PlistBuilder::new();
//! let k = b.string("k");
//! let v = b.int(42);
//! let root = b.dictionary(&[(k, v)]);
//! let bytes = b.build(root);
//! ```
//!
//! The writer emits whatever it is told to. It does not validate
//! references, so malformed fixtures (dangling indices, bad markers) are
//! built with the same calls as valid ones.

use bplist_wire::Trailer;
use bplist_wire::header::BPLIST_MAGIC;

/// Incremental container writer. Defaults to 1-byte offsets and references.
#[derive(Clone, Debug)]
pub struct PlistBuilder {
    objects: Vec<Vec<u8>>,
    offset_int_size: u8,
    object_ref_size: u8,
}

impl Default for PlistBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlistBuilder {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            offset_int_size: 1,
            object_ref_size: 1,
        }
    }

    /// Width of each offset table entry (1..=8).
    #[must_use]
    pub fn offset_int_size(mut self, width: u8) -> Self {
        self.offset_int_size = width;
        self
    }

    /// Width of each container reference (1..=8).
    #[must_use]
    pub fn object_ref_size(mut self, width: u8) -> Self {
        self.object_ref_size = width;
        self
    }

    /// Number of objects pushed so far.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ── Objects ───────────────────────────────────────────────────────────

    /// Append raw object bytes (marker included) and return the new index.
    pub fn raw(&mut self, bytes: impl Into<Vec<u8>>) -> u64 {
        self.objects.push(bytes.into());
        (self.objects.len() - 1) as u64
    }

    pub fn null(&mut self) -> u64 {
        self.raw([0x00])
    }

    pub fn bool(&mut self, value: bool) -> u64 {
        self.raw([if value { 0x09 } else { 0x08 }])
    }

    /// Smallest unsigned width that holds `value`; negatives use 8 bytes.
    pub fn int(&mut self, value: i64) -> u64 {
        let bytes = match u64::try_from(value) {
            Ok(unsigned) => sized_int(0x10, unsigned),
            Err(_) => {
                let mut out = vec![0x13];
                out.extend_from_slice(&value.to_be_bytes());
                out
            }
        };
        self.raw(bytes)
    }

    pub fn real(&mut self, value: f64) -> u64 {
        let mut out = vec![0x23];
        out.extend_from_slice(&value.to_bits().to_be_bytes());
        self.raw(out)
    }

    /// Seconds relative to 2001-01-01T00:00:00Z.
    pub fn date(&mut self, seconds: f64) -> u64 {
        let mut out = vec![0x33];
        out.extend_from_slice(&seconds.to_bits().to_be_bytes());
        self.raw(out)
    }

    pub fn data(&mut self, bytes: &[u8]) -> u64 {
        let mut out = length_marker(0x40, bytes.len() as u64);
        out.extend_from_slice(bytes);
        self.raw(out)
    }

    /// ASCII when every char is 7-bit, UTF-16 otherwise.
    pub fn string(&mut self, text: &str) -> u64 {
        if text.is_ascii() {
            let mut out = length_marker(0x50, text.len() as u64);
            out.extend_from_slice(text.as_bytes());
            self.raw(out)
        } else {
            let units: Vec<u16> = text.encode_utf16().collect();
            let mut out = length_marker(0x60, units.len() as u64);
            out.extend(units.iter().flat_map(|unit| unit.to_be_bytes()));
            self.raw(out)
        }
    }

    pub fn uid(&mut self, value: u64) -> u64 {
        self.raw(sized_int(0x80, value))
    }

    pub fn array(&mut self, items: &[u64]) -> u64 {
        let mut out = length_marker(0xA0, items.len() as u64);
        for &item in items {
            out.extend_from_slice(&self.reference(item));
        }
        self.raw(out)
    }

    /// Writes all key references, then all value references.
    pub fn dictionary(&mut self, pairs: &[(u64, u64)]) -> u64 {
        let mut out = length_marker(0xD0, pairs.len() as u64);
        for &(key, _) in pairs {
            out.extend_from_slice(&self.reference(key));
        }
        for &(_, value) in pairs {
            out.extend_from_slice(&self.reference(value));
        }
        self.raw(out)
    }

    // ── Assembly ──────────────────────────────────────────────────────────

    /// Lay out header, objects in index order, offset table and trailer.
    ///
    /// # Panics
    ///
    /// If an object offset does not fit in `offset_int_size` bytes.
    pub fn build(&self, top_object: u64) -> Vec<u8> {
        let mut buf = BPLIST_MAGIC.to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            offsets.push(buf.len() as u64);
            buf.extend_from_slice(object);
        }

        let offset_table_offset = buf.len() as u64;
        for offset in offsets {
            buf.extend_from_slice(&truncate(offset, self.offset_int_size));
        }

        let trailer = Trailer {
            offset_int_size: self.offset_int_size,
            object_ref_size: self.object_ref_size,
            object_count: self.objects.len() as u64,
            top_object,
            offset_table_offset,
        };
        buf.extend_from_slice(&trailer.to_bytes());
        buf
    }

    fn reference(&self, index: u64) -> Vec<u8> {
        truncate(index, self.object_ref_size)
    }
}

/// Marker for a length-bearing object: inline count below 15, otherwise
/// `0xF` followed by an int object holding the count.
pub fn length_marker(high: u8, count: u64) -> Vec<u8> {
    match u8::try_from(count) {
        Ok(inline) if inline < 0x0F => vec![high | inline],
        _ => {
            let mut out = vec![high | 0x0F];
            out.extend(sized_int(0x10, count));
            out
        }
    }
}

/// Self-sized integer with the smallest width in 1, 2, 4, 8 that holds
/// `value`.
pub fn sized_int(high: u8, value: u64) -> Vec<u8> {
    let (nibble, width) = match value {
        0..=0xFF => (0, 1),
        0x100..=0xFFFF => (1, 2),
        0x1_0000..=0xFFFF_FFFF => (2, 4),
        _ => (3, 8),
    };
    let mut out = vec![high | nibble];
    out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
    out
}

/// Parse a hex fixture, ignoring whitespace.
///
/// # Panics
///
/// On invalid hex.
pub fn from_hex(text: &str) -> Vec<u8> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).expect("fixture hex must be valid")
}

fn truncate(value: u64, width: u8) -> Vec<u8> {
    let width = usize::from(width);
    assert!(
        width == 8 || value >> (width * 8) == 0,
        "{value} does not fit in {width} bytes"
    );
    value.to_be_bytes()[8 - width..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_cat_container() {
        let mut b = PlistBuilder::new();
        let root = b.string("cat");
        let bytes = b.build(root);

        let expected = from_hex(
            "62706c6973743030 53636174 08
             000000000000 01 01
             0000000000000001 0000000000000000 000000000000000c",
        );
        assert_eq!(bytes, expected);
    }

    #[test]
    fn length_marker_switches_to_explicit_at_fifteen() {
        assert_eq!(length_marker(0x50, 14), vec![0x5E]);
        assert_eq!(length_marker(0x50, 15), vec![0x5F, 0x10, 0x0F]);
        assert_eq!(length_marker(0xA0, 300), vec![0xAF, 0x11, 0x01, 0x2C]);
    }

    #[test]
    fn sized_int_picks_smallest_width() {
        assert_eq!(sized_int(0x10, 7), vec![0x10, 7]);
        assert_eq!(sized_int(0x10, 256), vec![0x11, 1, 0]);
        assert_eq!(sized_int(0x80, 70_000), vec![0x82, 0, 1, 0x11, 0x70]);
        assert_eq!(sized_int(0x10, u64::MAX).len(), 9);
    }

    #[test]
    fn dictionary_writes_parallel_tables() {
        let mut b = PlistBuilder::new();
        let dict = b.dictionary(&[(1, 2), (3, 4)]);
        assert_eq!(dict, 0);
        assert_eq!(b.objects[0], vec![0xD2, 1, 3, 2, 4]);
    }

    #[test]
    fn wide_references() {
        let mut b = PlistBuilder::new().object_ref_size(2);
        b.array(&[1, 0x0102]);
        assert_eq!(b.objects[0], vec![0xA2, 0, 1, 1, 2]);
    }
}
