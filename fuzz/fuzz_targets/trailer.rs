#![no_main]

use bplist_wire::trailer::{Trailer, TRAILER_SIZE};
use libfuzzer_sys::fuzz_target;

// Fuzz target: Trailer::read_from.
//
// A trailer that passes validation must describe an offset table lying
// between the header and the trailer, and must serialize back to the same
// non-reserved bytes.
fuzz_target!(|data: &[u8]| {
    let Ok(trailer) = Trailer::read_from(data) else {
        return;
    };

    let table_end = trailer
        .offset_table_len()
        .and_then(|len| len.checked_add(trailer.offset_table_offset))
        .expect("validated trailer overflowed");
    assert!(trailer.offset_table_offset >= 8);
    assert!(table_end + TRAILER_SIZE as u64 <= data.len() as u64);

    let raw = &data[data.len() - TRAILER_SIZE..];
    assert_eq!(&trailer.to_bytes()[6..], &raw[6..]);
});
