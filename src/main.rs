use clap::Parser;
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use thumbwright::config::{self, EnvSource, Settings};
use thumbwright::types::{Request, SizeSelection};
use thumbwright::{output, process};
use tracing::{error, warn};

/// Long flags that are also accepted with a single dash (`-env`, `-xl`).
const SINGLE_DASH_LONG: &[&str] = &["env", "xl", "json"];

/// Boolean flags that may carry an explicit value (`-a=true`, `-xl=false`).
const BOOL_FLAGS: &[&str] = &[
    "w", "a", "s", "m", "l", "xl", "json", "watermark", "all", "small", "medium", "large",
];

#[derive(Parser)]
#[command(name = "thumbwright")]
#[command(about = "Resize an image into size variants with an optional watermark")]
#[command(long_about = "\
Resize an image into size variants with an optional watermark

Each enabled size is written to <OUTPUT_BASE_DIR>/<size>/<file name> at the
width configured in the env file, keeping the aspect ratio, and then chowned
to OWNER_USER:OWNER_USER.

Env file keys:

  OUTPUT_BASE_DIR   required
  OWNER_USER        required
  WATERMARK_FILE    image overlaid on m, l and xl when -w is given
  DIMENSION_S       pixel width for s (empty = skip)
  DIMENSION_M       pixel width for m, watermark at 33% of the width
  DIMENSION_L       pixel width for l, watermark at 66%
  DIMENSION_XL      pixel width for xl, watermark at 100%

Variables already set in the environment take precedence over the file.
Boolean flags also accept an explicit value, as in -a=true or -xl=false.
Only the first positional argument is processed; any others are ignored.")]
#[command(version)]
struct Cli {
    /// Environment file to load
    #[arg(long, default_value = config::DEFAULT_ENV_FILE)]
    env: PathBuf,

    /// Add the watermark to m, l and xl
    #[arg(short = 'w', long)]
    watermark: bool,

    /// Process all sizes
    #[arg(short = 'a', long)]
    all: bool,

    /// Process the small size
    #[arg(short = 's', long)]
    small: bool,

    /// Process the medium size
    #[arg(short = 'm', long)]
    medium: bool,

    /// Process the large size
    #[arg(short = 'l', long)]
    large: bool,

    /// Process the extra-large size
    #[arg(long = "xl")]
    extra_large: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Input image
    input: PathBuf,

    #[arg(hide = true)]
    extra: Vec<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.extra.is_empty() {
        warn!(ignored = ?cli.extra, "Ignoring extra positional arguments");
    }
    let env = EnvSource::load(&cli.env)?;
    let settings = Settings::from_source(&env)?;
    let request = Request {
        input: cli.input,
        sizes: SizeSelection::from_flags(
            cli.all,
            cli.small,
            cli.medium,
            cli.large,
            cli.extra_large,
        ),
        watermark: cli.watermark,
    };

    let report = process::run(&settings, &request)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_run_report(&report);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// How one command-line argument is rewritten before clap sees it.
#[derive(Debug, PartialEq, Eq)]
enum Rewrite {
    Keep,
    Drop,
    Replace(String),
}

/// Rewrite Go-style flag spellings into what clap accepts:
///
/// - `-env`, `-env=x` and `-xl` become their `--` form so clap does not read
///   them as bundled short flags
/// - `-a=true` becomes `-a`, `-xl=false` is dropped
///
/// Arguments after `--` are left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut normalized = Vec::new();
    let mut positional_only = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || positional_only {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str().map_or(Rewrite::Keep, rewrite_arg) {
            Rewrite::Keep => normalized.push(arg),
            Rewrite::Drop => {}
            Rewrite::Replace(new) => normalized.push(OsString::from(new)),
        }
    }
    normalized
}

fn rewrite_arg(arg: &str) -> Rewrite {
    let double_dash = arg.starts_with("--");
    let Some(body) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
        return Rewrite::Keep;
    };
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    if let Some(value) = value {
        if BOOL_FLAGS.contains(&name) {
            return match parse_bool(value) {
                Some(true) => Rewrite::Replace(flag_spelling(name)),
                Some(false) => Rewrite::Drop,
                None => Rewrite::Keep,
            };
        }
    }
    if !double_dash && SINGLE_DASH_LONG.contains(&name) {
        return Rewrite::Replace(format!("-{arg}"));
    }
    Rewrite::Keep
}

fn flag_spelling(name: &str) -> String {
    if name.len() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Boolean values in the spellings Go's flag package accepts.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
