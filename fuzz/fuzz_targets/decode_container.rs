#![no_main]

use arbitrary::Arbitrary;
use bplist_wire::trailer::Trailer;
use libfuzzer_sys::fuzz_target;

// Fuzz target: structurally valid containers with arbitrary object bytes.
//
// Raw-byte fuzzing rarely gets past the trailer checks. Here the header,
// offset table and trailer are always consistent, so the fuzzer spends its
// time inside the object extractors.
//
// Container references are rewritten to point only at later indices: the
// decoder has no cycle guard, so a cyclic graph would overflow the stack.
// The reference cap keeps each run short; fan-out beyond the decoder's node
// budget surfaces as `NodeLimitExceeded`.
#[derive(Arbitrary, Debug)]
struct Input {
    objects: Vec<Vec<u8>>,
    object_ref_size: u8,
    top_object: u8,
}

const MAX_OBJECTS: usize = 32;
const MAX_REFS: usize = 24;

fuzz_target!(|input: Input| {
    let mut objects = input.objects;
    if objects.is_empty() || objects.len() > MAX_OBJECTS {
        return;
    }
    let ref_size = usize::from(input.object_ref_size % 8 + 1);
    make_acyclic(&mut objects, ref_size);

    let mut buf = b"bplist00".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for object in &objects {
        offsets.push(buf.len() as u64);
        buf.extend_from_slice(object);
    }

    let offset_table_offset = buf.len() as u64;
    for offset in offsets {
        buf.extend_from_slice(&offset.to_be_bytes());
    }

    let trailer = Trailer {
        offset_int_size: 8,
        object_ref_size: ref_size as u8,
        object_count: objects.len() as u64,
        top_object: u64::from(input.top_object) % objects.len() as u64,
        offset_table_offset,
    };
    buf.extend_from_slice(&trailer.to_bytes());

    let _ = bplist_decoder::read_binary_plist(&buf);
});

/// Force every array or dictionary to an inline count whose references all
/// name strictly later objects.
fn make_acyclic(objects: &mut [Vec<u8>], ref_size: usize) {
    let n = objects.len();
    let mut budget = MAX_REFS;

    for (i, object) in objects.iter_mut().enumerate() {
        let Some(&marker) = object.first() else {
            continue;
        };
        let per_entry = match marker >> 4 {
            0xA => 1,
            0xD => 2,
            _ => continue,
        };

        let later = n - i - 1;
        let wanted = usize::from((marker & 0x0F) % 15);
        let count = if later == 0 {
            0
        } else {
            wanted.min(budget / per_entry)
        };
        budget -= count * per_entry;

        object[0] = (marker & 0xF0) | count as u8;
        let refs = count * per_entry;
        object.resize(1 + refs * ref_size, 0);

        for slot in object[1..].chunks_exact_mut(ref_size) {
            let target = (i + 1 + usize::from(slot[ref_size - 1]) % later) as u64;
            slot.copy_from_slice(&target.to_be_bytes()[8 - ref_size..]);
        }
    }
}
