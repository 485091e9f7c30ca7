// Container assembly for unit tests. Objects are raw pre-encoded bytes laid
// out back to back after the header, in index order.

use bplist_wire::Trailer;
use bplist_wire::header::BPLIST_MAGIC;

/// Assemble a container with 1-byte offset table entries.
pub(crate) fn build(objects: &[Vec<u8>], object_ref_size: u8, top_object: u64) -> Vec<u8> {
    build_with(objects, object_ref_size, top_object, 1)
}

/// Assemble a container with an explicit offset table entry width.
pub(crate) fn build_with(
    objects: &[Vec<u8>],
    object_ref_size: u8,
    top_object: u64,
    offset_int_size: u8,
) -> Vec<u8> {
    let mut buf = BPLIST_MAGIC.to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for object in objects {
        offsets.push(buf.len() as u64);
        buf.extend_from_slice(object);
    }

    let offset_table_offset = buf.len() as u64;
    let width = usize::from(offset_int_size);
    for offset in offsets {
        buf.extend_from_slice(&offset.to_be_bytes()[8 - width..]);
    }

    let trailer = Trailer {
        offset_int_size,
        object_ref_size,
        object_count: objects.len() as u64,
        top_object,
        offset_table_offset,
    };
    buf.extend_from_slice(&trailer.to_bytes());
    buf
}

/// A container holding exactly one object.
pub(crate) fn single(object: &[u8]) -> Vec<u8> {
    build(&[object.to_vec()], 1, 0)
}
