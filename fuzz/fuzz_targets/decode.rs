#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full decode of arbitrary bytes.
//
// Catches bugs in:
// - Trailer geometry checks (overflowing counts and offsets)
// - Offset table reads past the buffer
// - Length and reference arithmetic inside objects
//
// Also checks that a failed sniff always means a failed decode, and that
// decoding the same bytes twice gives the same tree.
//
// A container that references itself overflows the stack. Crashes of that
// shape are known; `decode_container` covers the extractors without them.
fuzz_target!(|data: &[u8]| {
    let first = bplist_decoder::read_binary_plist(data);
    if !bplist_decoder::is_binary_plist(data) {
        assert!(first.is_err());
    }

    if let Ok(value) = first {
        let again = bplist_decoder::read_binary_plist(data).expect("second decode failed");
        // Debug formatting compares NaN reals as equal.
        assert_eq!(format!("{value:?}"), format!("{again:?}"));
    }
});
