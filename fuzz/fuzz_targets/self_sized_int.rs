#![no_main]

use bplist_wire::sized_int::read_self_sized_int;
use libfuzzer_sys::fuzz_target;

// Fuzz target: self-sized integer reader at every start offset.
//
// The consumed length must be the marker plus 1, 2, 4 or 8 bytes and must
// stay inside the buffer.
fuzz_target!(|data: &[u8]| {
    for offset in 0..data.len().min(16) {
        if let Ok((_, consumed)) = read_self_sized_int(data, offset) {
            assert!(matches!(consumed, 2 | 3 | 5 | 9));
            assert!(offset + consumed <= data.len());
        }
    }
});
