use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dxlshark_core::config::{ControllerHint, DisplayBase, Protocol1Family, Protocol2Family};
use dxlshark_core::{CaptureFormat, Report};
use glob::glob;
use tracing::debug;

mod config;
mod logging;
mod render;

use config::{DEFAULT_BAUD, InputFormat, Overrides};

const EXAMPLES: &str = "Examples:\n  dxlshark decode capture.csv --text\n  dxlshark decode capture.csv -o report.json\n  dxlshark decode dump.bin --format raw --baud 57600 --p1-family mx --stdout";

#[derive(Parser, Debug)]
#[command(name = "dxlshark")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DXLSHARK_BUILD_COMMIT"),
    " ",
    env!("DXLSHARK_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Passive decoder for Dynamixel Protocol 1 / Protocol 2 bus captures.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a bus capture into frames (text) or a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Path to a .csv export or raw .bin capture (a glob matching one file is accepted)
    input: PathBuf,

    /// Capture format (default: from file extension)
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Baud rate used to time raw captures
    #[arg(long)]
    baud: Option<u32>,

    /// Numeric display base: auto, dec, hex
    #[arg(long)]
    base: Option<DisplayBase>,

    /// Protocol 1 servo family: ax, mx, xl320, x
    #[arg(long = "p1-family")]
    p1_family: Option<Protocol1Family>,

    /// Protocol 2 servo family: x, mx, xl320
    #[arg(long = "p2-family")]
    p2_family: Option<Protocol2Family>,

    /// Controller hint: unknown, reserved-id, controller-board
    #[arg(long)]
    controller: Option<ControllerHint>,

    /// Show multi-byte registers as one value (yes) or as raw bytes (no)
    #[arg(long, value_parser = config::parse_yes_no)]
    register_pairs: Option<bool>,

    /// TOML file with [decoder] and [capture] settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present_any = ["stdout", "text"])]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Print one rendered line per frame instead of JSON
    #[arg(long, conflicts_with_all = ["report", "stdout"])]
    text: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if checksum errors or malformed frames are present
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;

    let file_config = config::load(args.config.as_deref())?;
    let decoder_config = config::apply(
        file_config.decoder,
        Overrides {
            display_base: args.base,
            protocol1_family: args.p1_family,
            protocol2_family: args.p2_family,
            controller: args.controller,
            register_pairs: args.register_pairs,
        },
    );
    let format = match args.format.or(file_config.capture.format) {
        Some(format) => format,
        None => format_from_extension(&resolved_input)?,
    };
    let capture_format = match format {
        InputFormat::Csv => CaptureFormat::Csv,
        InputFormat::Raw => CaptureFormat::Raw {
            baud: args.baud.or(file_config.capture.baud).unwrap_or(DEFAULT_BAUD),
        },
    };
    debug!(?capture_format, ?decoder_config, input = %resolved_input.display(), "decoding");

    if let Some(report_path) = args.report.as_ref() {
        ensure_distinct_output(&resolved_input, report_path)?;
    }

    let rep = dxlshark_core::analyze_capture_file(&resolved_input, capture_format, decoder_config)
        .context("capture decoding failed")?;

    if args.text {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render::write_frames(&mut out, &rep.frames, &decoder_config)
            .and_then(|()| out.flush())
            .context("Failed to write frames")?;
        if !args.quiet {
            print_summary(&rep);
        }
        return check_strict(&rep, args.strict);
    }

    let json = serialize_report(&rep, args.pretty, args.compact)?;
    if args.stdout {
        print!("{}", json);
        return check_strict(&rep, args.strict);
    }

    let report = args.report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report, --stdout or --text".to_string()),
        )
    })?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !args.quiet {
        print_summary(&rep);
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(&rep, args.strict)
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // The output directory may not exist yet; nothing to collide with then.
    let Ok(report_dir) = fs::canonicalize(report_dir) else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_summary(rep: &Report) {
    let integrity = &rep.integrity;
    eprintln!(
        "{} frames, {} checksum errors, {} malformed, {} discarded partials",
        rep.frames.len(),
        integrity.checksum_mismatches,
        integrity.malformed_frames,
        integrity.discarded_partials
    );
}

fn check_strict(rep: &Report, strict: bool) -> Result<(), CliError> {
    if strict && !rep.integrity.is_clean() {
        return Err(CliError::new(
            format!(
                "integrity errors detected ({} checksum, {} malformed)",
                rep.integrity.checksum_mismatches, rep.integrity.malformed_frames
            ),
            Some("inspect the frames with --text".to_string()),
        ));
    }
    Ok(())
}

fn format_from_extension(input: &Path) -> Result<InputFormat, CliError> {
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Ok(InputFormat::Csv),
        "bin" | "raw" | "dat" => Ok(InputFormat::Raw),
        _ => Err(CliError::new(
            format!("cannot infer capture format for '{}'", input.display()),
            Some("pass --format csv or --format raw".to_string()),
        )),
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .csv export or a raw .bin capture".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .csv export or a raw .bin capture".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {listed}{more}",
                pattern,
                matches.len()
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
