/// Implementation of `bplist decode`.
///
/// Decodes the file with [`BplistDecoder`], renders the tree with
/// [`DefaultRenderer`], and writes the result to stdout or `-o <file>`.
///
/// ```text
/// ┌────────┬───────────────────────────────────────────────────────────┐
/// │ Format │ Output                                                    │
/// ├────────┼───────────────────────────────────────────────────────────┤
/// │ json   │ {"name": "cat"}   pretty unless --compact (default)       │
/// │ text   │ { name = cat; }   OpenStep-flavoured, indented            │
/// └────────┴───────────────────────────────────────────────────────────┘
/// ```
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow};
use bplist_decoder::BplistDecoder;
use bplist_render::{DefaultRenderer, OutputFormat, PlistRenderer, RenderConfig};

use crate::DecodeArgs;

/// Run the `bplist decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, the `--format`
/// value is unrecognised, or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let format = parse_output_format(&args.format)?;

    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let value = BplistDecoder::decode(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    tracing::debug!(kind = value.kind(), ?format, "rendering");

    let config = RenderConfig {
        format,
        pretty: !args.compact,
    };
    let rendered = DefaultRenderer
        .render(&value, &config)
        .context("render failed")?;

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
        handle.write_all(b"\n").context("cannot write to stdout")?;
    }

    Ok(())
}

// ── Flag parsers ──────────────────────────────────────────────────────────────

/// Parses the `--format` string to an [`OutputFormat`].
///
/// # Errors
///
/// Returns an error for unrecognised format names.
fn parse_output_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "text" | "txt" => Ok(OutputFormat::Text),
        _ => Err(anyhow!("unknown format {s:?}, expected json|text")),
    }
}
