//! End-to-end decoding scenarios.
//!
//! Each test assembles a container with [`PlistBuilder`] (or from raw hex),
//! runs the public entry points, and checks the resulting value tree.

use bplist_decoder::{BplistDecoder, DecodeError, is_binary_plist, read_binary_plist};
use bplist_tests::{PlistBuilder, from_hex};
use bplist_types::Value;
use bplist_wire::WireError;

const CAT: &str = "62706c6973743030 53636174 08
                   000000000000 01 01
                   0000000000000001 0000000000000000 000000000000000c";

// ── Container ─────────────────────────────────────────────────────────────────

#[test]
fn cat_string() {
    let bytes = from_hex(CAT);
    assert!(is_binary_plist(&bytes));
    assert_eq!(read_binary_plist(&bytes).unwrap(), Value::from("cat"));
}

#[test]
fn every_short_prefix_fails() {
    let bytes = from_hex(CAT);
    for len in 0..40 {
        assert!(!is_binary_plist(&bytes[..len]), "len {len}");
        assert!(read_binary_plist(&bytes[..len]).is_err(), "len {len}");
    }
}

#[test]
fn sniff_does_not_validate_trailer() {
    let mut bytes = from_hex(CAT);
    let width = bytes.len() - 26;
    bytes[width] = 0;
    assert!(is_binary_plist(&bytes));
    assert!(read_binary_plist(&bytes).is_err());
}

#[test]
fn every_width_byte_out_of_range_fails() {
    let base = from_hex(CAT);
    let trailer = base.len() - 32;
    for field in [trailer + 6, trailer + 7] {
        for bad in [0u8, 9, 10, 0x80, 0xFF] {
            let mut bytes = base.clone();
            bytes[field] = bad;
            assert!(
                matches!(
                    read_binary_plist(&bytes),
                    Err(DecodeError::InvalidContainer(WireError::InvalidWidth { .. }))
                ),
                "byte {field} = {bad}"
            );
        }
    }
}

#[test]
fn offset_table_overlapping_trailer_fails() {
    let mut bytes = from_hex(CAT);
    let len = bytes.len();
    // offset_table_offset = 13 pushes the 1-byte table into the trailer.
    bytes[len - 1] = 13;
    assert!(matches!(
        read_binary_plist(&bytes),
        Err(DecodeError::InvalidContainer(
            WireError::OffsetTableOutOfBounds { .. }
        ))
    ));
}

#[test]
fn huge_object_count_does_not_wrap() {
    let mut bytes = from_hex(CAT);
    let count = bytes.len() - 24;
    bytes[count..count + 8].copy_from_slice(&u64::MAX.to_be_bytes());
    assert!(matches!(
        read_binary_plist(&bytes),
        Err(DecodeError::InvalidContainer(
            WireError::OffsetTableOutOfBounds { .. }
        ))
    ));
}

// ── Values ────────────────────────────────────────────────────────────────────

#[test]
fn empty_array_for_every_ref_size() {
    for width in 1..=8 {
        let mut b = PlistBuilder::new().object_ref_size(width);
        let root = b.array(&[]);
        assert_eq!(
            read_binary_plist(&b.build(root)).unwrap(),
            Value::Array(vec![])
        );
    }
}

#[test]
fn dictionary_pairs_are_not_swapped() {
    let mut b = PlistBuilder::new();
    let k = b.string("k");
    let v = b.int(42);
    let root = b.dictionary(&[(k, v)]);

    let value = read_binary_plist(&b.build(root)).unwrap();
    assert_eq!(
        value,
        Value::Dictionary(vec![(Value::from("k"), Value::Int(42))])
    );
}

#[test]
fn uid_is_introspectable() {
    let mut b = PlistBuilder::new();
    let root = b.uid(7);
    let value = read_binary_plist(&b.build(root)).unwrap();

    assert_eq!(value.get("CF$UID"), Some(&Value::Int(7)));
    assert_eq!(value.as_uid(), Some(7));
    assert_eq!(value.kind(), "uid");
}

#[test]
fn explicit_length_with_non_int_size_fails() {
    let mut b = PlistBuilder::new();
    let mut object = vec![0x5F, 0x20, 0x00];
    object.extend_from_slice(b"abcdefghijklmnop");
    let root = b.raw(object);
    assert!(matches!(
        read_binary_plist(&b.build(root)),
        Err(DecodeError::LengthNotInt { marker: 0x20, .. })
    ));
}

#[test]
fn int_width_does_not_change_value() {
    let encodings: [&[u8]; 4] = [
        &[0x10, 0x7B],
        &[0x11, 0x00, 0x7B],
        &[0x12, 0x00, 0x00, 0x00, 0x7B],
        &[0x13, 0, 0, 0, 0, 0, 0, 0, 0x7B],
    ];
    for encoding in encodings {
        let mut b = PlistBuilder::new();
        let root = b.raw(encoding);
        assert_eq!(read_binary_plist(&b.build(root)).unwrap(), Value::Int(123));
    }
}

#[test]
fn top_bit_is_sign_only_at_eight_bytes() {
    let cases: [(&[u8], i64); 4] = [
        (&[0x10, 0xFF], 0xFF),
        (&[0x11, 0xFF, 0xFF], 0xFFFF),
        (&[0x12, 0xFF, 0xFF, 0xFF, 0xFF], 0xFFFF_FFFF),
        (&[0x13, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF], -1),
    ];
    for (encoding, expected) in cases {
        let mut b = PlistBuilder::new();
        let root = b.raw(encoding);
        assert_eq!(
            read_binary_plist(&b.build(root)).unwrap(),
            Value::Int(expected)
        );
    }
}

#[test]
fn every_value_kind_round_trips_through_builder() {
    let mut b = PlistBuilder::new();
    let keys = [
        b.string("null"),
        b.string("bool"),
        b.string("int"),
        b.string("neg"),
        b.string("real"),
        b.string("date"),
        b.string("data"),
        b.string("ascii"),
        b.string("unicode"),
        b.string("uid"),
    ];
    let values = [
        b.null(),
        b.bool(true),
        b.int(1 << 40),
        b.int(-5),
        b.real(2.5),
        b.date(86_400.0),
        b.data(&[1, 2, 3]),
        b.string("plain"),
        b.string("caf\u{e9} \u{1F431}"),
        b.uid(300),
    ];
    let pairs: Vec<(u64, u64)> = keys.into_iter().zip(values).collect();
    let root = b.dictionary(&pairs);

    let value = read_binary_plist(&b.build(root)).unwrap();
    assert!(value.get("null").is_some_and(Value::is_null));
    assert_eq!(value.get("bool").and_then(Value::as_bool), Some(true));
    assert_eq!(value.get("int").and_then(Value::as_i64), Some(1 << 40));
    assert_eq!(value.get("neg").and_then(Value::as_i64), Some(-5));
    assert_eq!(value.get("real").and_then(Value::as_f64), Some(2.5));
    assert_eq!(value.get("date"), Some(&Value::Date(86_400.0)));
    assert_eq!(value.get("data").and_then(Value::as_data), Some(&[1u8, 2, 3][..]));
    assert_eq!(value.get("ascii").and_then(Value::as_str), Some("plain"));
    assert_eq!(
        value.get("unicode").and_then(Value::as_str),
        Some("caf\u{e9} \u{1F431}")
    );
    assert_eq!(value.get("uid").and_then(Value::as_uid), Some(300));
}

#[test]
fn shared_subtree_is_copied_into_each_parent() {
    let mut b = PlistBuilder::new();
    let leaf = b.string("shared");
    let inner = b.array(&[leaf, leaf]);
    let root = b.array(&[inner, inner, leaf]);

    let value = read_binary_plist(&b.build(root)).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], items[1]);
    assert_eq!(items[2], Value::from("shared"));
}

#[test]
fn wide_offsets_and_references() {
    let mut b = PlistBuilder::new().offset_int_size(4).object_ref_size(8);
    let first = b.int(1);
    let second = b.string("two");
    let root = b.array(&[first, second]);

    assert_eq!(
        read_binary_plist(&b.build(root)).unwrap(),
        Value::Array(vec![Value::Int(1), Value::from("two")])
    );
}

#[test]
fn decode_is_deterministic() {
    let mut b = PlistBuilder::new();
    let k = b.string("k");
    let list = {
        let one = b.int(1);
        let t = b.bool(true);
        b.array(&[one, t, one])
    };
    let root = b.dictionary(&[(k, list)]);
    let bytes = b.build(root);

    let first = BplistDecoder::decode(&bytes).unwrap();
    for _ in 0..3 {
        assert_eq!(BplistDecoder::decode(&bytes).unwrap(), first);
    }
}

// ── Reference errors ──────────────────────────────────────────────────────────

#[test]
fn reference_one_past_end_fails_anywhere_in_graph() {
    let mut b = PlistBuilder::new();
    let leaf = b.int(1);
    // Deep reference to index 4 while only 4 objects exist.
    let inner = b.array(&[leaf, 4]);
    let key = b.string("k");
    let root = b.dictionary(&[(key, inner)]);
    assert_eq!(b.len(), 4);

    assert!(matches!(
        read_binary_plist(&b.build(root)),
        Err(DecodeError::ObjectIndexOutOfRange {
            index: 4,
            object_count: 4
        })
    ));
}

#[test]
fn top_object_one_past_end_fails() {
    let mut b = PlistBuilder::new();
    b.null();
    assert!(matches!(
        read_binary_plist(&b.build(1)),
        Err(DecodeError::ObjectIndexOutOfRange { index: 1, .. })
    ));
}
