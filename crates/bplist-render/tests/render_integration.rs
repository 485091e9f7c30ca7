//! Integration test: decode → render
//!
//! Assembles a binary plist by hand, decodes it, then renders the tree in
//! both output formats and checks the key mapping rules.

use bplist_decoder::BplistDecoder;
use bplist_render::{DefaultRenderer, OutputFormat, PlistRenderer, RenderConfig};
use bplist_wire::Trailer;
use serde_json::json;

/// Lay out pre-encoded objects after the header with 1-byte offsets and refs.
fn container(objects: &[&[u8]], top_object: u64) -> Vec<u8> {
    let mut buf = b"bplist00".to_vec();
    let mut offsets = Vec::new();
    for object in objects {
        offsets.push(u8::try_from(buf.len()).expect("fixture fits 1-byte offsets"));
        buf.extend_from_slice(object);
    }
    let offset_table_offset = buf.len() as u64;
    buf.extend_from_slice(&offsets);
    buf.extend_from_slice(
        &Trailer {
            offset_int_size: 1,
            object_ref_size: 1,
            object_count: objects.len() as u64,
            top_object,
            offset_table_offset,
        }
        .to_bytes(),
    );
    buf
}

/// {"name": "cat", "blob": <dead>, "when": date 0, "ids": [UID 1, 2]}
fn sample() -> Vec<u8> {
    container(
        &[
            &[0xD4, 1, 2, 3, 4, 5, 6, 7, 8],
            b"\x54name",
            b"\x54blob",
            b"\x54when",
            b"\x53ids",
            b"\x53cat",
            &[0x42, 0xDE, 0xAD],
            &[0x33, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0xA2, 9, 10],
            &[0x80, 0x01],
            &[0x10, 0x02],
        ],
        0,
    )
}

#[test]
fn decode_then_render_json() {
    let value = BplistDecoder::decode(&sample()).expect("decoding should succeed");
    let config = RenderConfig {
        format: OutputFormat::Json,
        pretty: false,
    };
    let rendered = DefaultRenderer
        .render(&value, &config)
        .expect("JSON render should succeed");

    let parsed: serde_json::Value =
        serde_json::from_str(&rendered).expect("output should be valid JSON");
    assert_eq!(
        parsed,
        json!({
            "name": "cat",
            "blob": { "$data": "dead" },
            "when": { "$date": 0.0 },
            "ids": [{ "CF$UID": 1 }, 2],
        })
    );
}

#[test]
fn decode_then_render_text() {
    let value = BplistDecoder::decode(&sample()).expect("decoding should succeed");
    let config = RenderConfig {
        format: OutputFormat::Text,
        ..RenderConfig::default()
    };
    let text = DefaultRenderer
        .render(&value, &config)
        .expect("text render should succeed");

    // Text output keeps plist order.
    let name = text.find("name = cat;").expect("name pair");
    let blob = text.find("blob = <dead>;").expect("blob pair");
    let when = text.find("when = <date 0.0>;").expect("when pair");
    assert!(name < blob && blob < when);
    assert!(text.contains("CF$UID = 1;"));
    assert!(text.starts_with('{') && text.ends_with('}'));
}
