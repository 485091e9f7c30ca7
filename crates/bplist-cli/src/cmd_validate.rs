/// Implementation of `bplist validate`.
///
/// Runs a full decode and reports either a series of success checkmarks
/// (`✓`) or a single diagnostic line (`✗`). The main dispatcher turns the
/// returned `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Header: bplist00 (45 bytes)
/// ✓ Trailer: 1 object, offset table at 12 (1-byte offsets, 1-byte refs)
/// ✓ Objects: root object 0 is a string, decoded without error
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: object index 2 out of range (object count 2)
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use bplist_decoder::{BplistDecoder, DecodeError};

use crate::ValidateArgs;

/// Run the `bplist validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    match BplistDecoder::decode_document(&bytes) {
        Ok(doc) => {
            let trailer = &doc.trailer;
            println!("✓ Header: bplist00 ({} bytes)", bytes.len());
            println!(
                "✓ Trailer: {} object{}, offset table at {} ({}-byte offsets, {}-byte refs)",
                trailer.object_count,
                if trailer.object_count == 1 { "" } else { "s" },
                trailer.offset_table_offset,
                trailer.offset_int_size,
                trailer.object_ref_size,
            );
            println!(
                "✓ Objects: root object {} is a {}, decoded without error",
                trailer.top_object,
                doc.root.kind()
            );
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Container failures get a short prefix naming the layer; object-level
/// errors already carry their offset and print as-is.
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::InvalidContainer(inner) => format!("invalid container: {inner}"),
        other => other.to_string(),
    }
}
