/// XBF command-line tool — inspect and validate Xilinx `.bit` headers.
///
/// # Command overview
///
/// ```text
/// xbf <COMMAND> [OPTIONS]
///
/// Commands:
///   info       Print the header fields of a bitstream
///   validate   Check a bitstream header for structural correctness
///   regress    Write the synthetic regression headers to disk and re-parse them
///   help       Print help information
///
/// Global options:
///   -v, --verbose     More logging on stderr (-v debug, -vv trace)
///   --diagnostics     Append "[FieldN at offset 0x....]" to header errors
///   -h, --help        Print help
///   -V, --version     Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (unreadable file, bad header, failed case) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xbf_decoder::{DecoderConfig, HeaderDecoder};

mod cmd_info;
mod cmd_regress;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Xilinx bitstream (`.bit`) header tool.
#[derive(Parser)]
#[command(name = "xbf", version, about = "Xilinx bitstream header tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (repeatable). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Append the failing field and byte offset to header errors.
    #[arg(long, global = true)]
    diagnostics: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the header fields of a bitstream.
    Info(InfoArgs),
    /// Check a bitstream header for structural correctness.
    Validate(ValidateArgs),
    /// Run the synthetic-header regression suite.
    Regress(RegressArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `xbf info`.
///
/// ```text
/// ┌─────────────────┬───────────────────────────────────────────────┐
/// │ Flag            │ Effect                                        │
/// ├─────────────────┼───────────────────────────────────────────────┤
/// │ --json          │ Print one JSON object instead of the summary  │
/// │ --show-preamble │ Include the 9 opaque Field1 bytes as hex      │
/// └─────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to the `.bit` file.
    pub file: PathBuf,

    /// Emit JSON.
    #[arg(long)]
    pub json: bool,

    /// Show the opaque preamble bytes in hex.
    #[arg(long)]
    pub show_preamble: bool,
}

/// Arguments for `xbf validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.bit` file.
    pub file: PathBuf,
}

/// Arguments for `xbf regress`.
///
/// Each case is written to `<dir>/<name>.out`, opened the same way `info`
/// opens a file, and checked against its expected outcome. Output is TAP:
/// a `1..N` plan line, then `ok K` or `not ok K # ...` per case. The run
/// stops at the first unexpected outcome.
#[derive(clap::Args)]
pub struct RegressArgs {
    /// Directory for the generated case files (created if missing).
    #[arg(short, long)]
    pub dir: PathBuf,

    /// `all`, or the 1-based number of a single case.
    #[arg(default_value = "all")]
    pub case: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let decoder = HeaderDecoder::new(DecoderConfig::default().with_diagnostics(cli.diagnostics));

    let result = match cli.command {
        Commands::Info(args) => cmd_info::run(&args, &decoder),
        Commands::Validate(args) => cmd_validate::run(&args, &decoder),
        Commands::Regress(args) => cmd_regress::run(&args, &decoder, cli.verbose > 0),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
