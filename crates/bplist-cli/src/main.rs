/// Binary plist command-line tool: inspect, validate, and decode
/// `bplist00` files.
///
/// # Command overview
///
/// ```text
/// bplist <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print trailer geometry and an optional per-object marker table
///   validate   Fully decode a file and report success or the first error
///   decode     Render the decoded tree as JSON or indented text
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Debug logging to stderr (RUST_LOG overrides)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details and log output go to stderr so stdout can be piped
/// cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Inspect, validate, and decode binary property lists.
#[derive(Parser)]
#[command(name = "bplist", version, about = "Binary property list CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the trailer and, optionally, the marker of each object.
    Inspect(InspectArgs),
    /// Decode a file completely and report whether it is valid.
    Validate(ValidateArgs),
    /// Render a file as JSON or indented text.
    Decode(DecodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bplist inspect`.
///
/// Validates the container and prints its trailer. Object listing reads
/// only the offset table and each object's marker byte; nothing is
/// decoded, so it also works on files whose objects are malformed.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Flag       │ Effect                                               │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ --objects  │ One line per object: offset, marker, kind            │
/// │ --object N │ Show only the object at index N (implies --objects)  │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the binary plist to inspect.
    pub file: PathBuf,

    /// List every object's offset and marker kind.
    #[arg(long)]
    pub objects: bool,

    /// List only the object at this zero-based index.
    #[arg(long)]
    pub object: Option<u64>,
}

/// Arguments for `bplist validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the binary plist to validate.
    pub file: PathBuf,
}

/// Arguments for `bplist decode`.
///
/// ```text
/// ┌───────────────┬───────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                  │
/// ├───────────────┼───────────────────────────────────────────────────┤
/// │ --format      │ json (default) | text                             │
/// │ --compact     │ single-line JSON                                  │
/// │ -o / --output │ write to file instead of stdout                   │
/// └───────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the binary plist to decode.
    pub file: PathBuf,

    /// Output format: `json` or `text`.
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Emit single-line JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
