/// Implementation of `bplist inspect`.
///
/// # Output format
///
/// ```text
/// Container: bplist00, 50 bytes
/// Trailer: 3 objects, top_object=0, offset_int_size=1, object_ref_size=1, offset_table_offset=15
/// Object 0: dictionary @ 8 marker=0xD1 count=1
/// Object 1: ascii-string @ 11 marker=0x51 count=1
/// Object 2: int @ 13 marker=0x10
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use bplist_decoder::DecodeContext;
use bplist_wire::ObjectKind;
use bplist_wire::marker::{EXPLICIT_LENGTH, low_nibble};

use crate::InspectArgs;

/// Run the `bplist inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the container fails
/// validation, or `--object` names an index past the object count.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let ctx = DecodeContext::new(&bytes)
        .with_context(|| format!("failed to read container {}", args.file.display()))?;

    let trailer = ctx.trailer();
    println!("Container: bplist00, {} bytes", ctx.len());
    println!(
        "Trailer: {} object{}, top_object={}, offset_int_size={}, object_ref_size={}, offset_table_offset={}",
        trailer.object_count,
        if trailer.object_count == 1 { "" } else { "s" },
        trailer.top_object,
        trailer.offset_int_size,
        trailer.object_ref_size,
        trailer.offset_table_offset,
    );

    for line in object_lines(&ctx, args.object, args.objects)? {
        println!("{line}");
    }

    Ok(())
}

// ── Object formatting ─────────────────────────────────────────────────────────

/// Lines for `--object N` (just that index) or `--objects` (every index).
fn object_lines(ctx: &DecodeContext<'_>, object: Option<u64>, all: bool) -> Result<Vec<String>> {
    if let Some(index) = object {
        ctx.check_index(index)
            .map_err(|e| anyhow!("--object {index}: {e}"))?;
        return Ok(vec![object_line(ctx, index)]);
    }
    if !all {
        return Ok(Vec::new());
    }
    Ok((0..ctx.object_count())
        .map(|index| object_line(ctx, index))
        .collect())
}

/// One line for object `index`. A bad offset table entry is reported on the
/// line instead of aborting the listing.
fn object_line(ctx: &DecodeContext<'_>, index: u64) -> String {
    let offset = match ctx.object_offset(index) {
        Ok(offset) => offset,
        Err(e) => return format!("Object {index}: ✗ {e}"),
    };

    let marker = ctx.bytes()[offset];
    let kind = ObjectKind::from_marker(marker);
    let mut line = format!("Object {index}: {} @ {offset} marker={marker:#04X}", kind.label());

    if kind.has_length() {
        let nibble = low_nibble(marker);
        if nibble == EXPLICIT_LENGTH {
            line.push_str(" count=explicit");
        } else {
            line.push_str(&format!(" count={nibble}"));
        }
    }

    line
}
