//! `inibuf`: inspect and edit INI files from the command line.
//!
//! # Usage
//!
//! ```text
//! inibuf [OPTIONS] <COMMAND>
//!
//! Commands:
//!   check  <FILE>                                 Load and summarise a file
//!   get    <FILE> <SECTION> <KEY> [--as TYPE]     Print one value
//!   set    <FILE> <SECTION> <KEY> <VALUE> [--as TYPE] [--output PATH]
//!   erase  <FILE> <SECTION> [KEY] [--output PATH]
//!   dump   <FILE>                                 Print the typed structure as JSON
//!   bench  <FILE> [--iterations N] [--output PATH]
//!
//! Options:
//!   --log-level <FILTER>   Log filter when RUST_LOG is unset [default: warn]
//!   --strict               Strict numeric type inference
//!   --precision <DIGITS>   Fractional digits for stored floats [default: 6]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable           | Default | Description                          |
//! |--------------------|---------|--------------------------------------|
//! | `INIBUF_LOG`       | `warn`  | Log filter (same syntax as RUST_LOG) |
//! | `INIBUF_STRICT`    | unset   | `true` enables strict inference      |
//! | `INIBUF_PRECISION` | `6`     | Fractional digits for stored floats  |
//!
//! Logs go to stderr so command output on stdout stays pipeable.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inibuf_cli::application::{self, run_benchmark};
use inibuf_core::{DataType, SniffMode, StoreOptions, DEFAULT_FLOAT_PRECISION};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit INI configuration files.
#[derive(Debug, Parser)]
#[command(name = "inibuf", about = "Typed INI configuration store", version)]
struct Cli {
    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `inibuf_core=debug`).
    #[arg(long, global = true, default_value = "warn", env = "INIBUF_LOG")]
    log_level: String,

    /// Only treat text as numeric if it has at least one digit and at most one dot.
    #[arg(long, global = true, env = "INIBUF_STRICT")]
    strict: bool,

    /// Fractional digits written for float values.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_FLOAT_PRECISION,
        env = "INIBUF_PRECISION"
    )]
    precision: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a file and print how many sections and properties it holds.
    Check { file: PathBuf },

    /// Print a single value.
    Get {
        file: PathBuf,
        section: String,
        key: String,
        /// Convert to this type (string, int, float, bool) before printing.
        #[arg(long = "as")]
        as_type: Option<DataType>,
    },

    /// Set a value and write the file back.
    Set {
        file: PathBuf,
        section: String,
        key: String,
        value: String,
        /// Store the canonical form of this type instead of the text as given.
        #[arg(long = "as")]
        as_type: Option<DataType>,
        /// Write here instead of overwriting FILE.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Erase a property, or a whole section when KEY is omitted.
    Erase {
        file: PathBuf,
        section: String,
        key: Option<String>,
        /// Write here instead of overwriting FILE.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the typed structure as JSON.
    Dump { file: PathBuf },

    /// Time repeated load, write and clear cycles.
    Bench {
        file: PathBuf,
        #[arg(long, default_value_t = 100)]
        iterations: u32,
        /// Where each iteration writes its output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn store_options(&self) -> StoreOptions {
        StoreOptions {
            sniff_mode: if self.strict {
                SniffMode::Strict
            } else {
                SniffMode::Compatible
            },
            float_precision: self.precision,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level / INIBUF_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let options = cli.store_options();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Check { file } => application::check(&file, options, &mut out)?,
        Command::Get {
            file,
            section,
            key,
            as_type,
        } => application::get(&file, &section, &key, as_type, options, &mut out)?,
        Command::Set {
            file,
            section,
            key,
            value,
            as_type,
            output,
        } => application::set(
            &file,
            &section,
            &key,
            &value,
            as_type,
            output.as_deref(),
            options,
        )?,
        Command::Erase {
            file,
            section,
            key,
            output,
        } => application::erase(&file, &section, key.as_deref(), output.as_deref(), options)?,
        Command::Dump { file } => application::dump(&file, options, &mut out)?,
        Command::Bench {
            file,
            iterations,
            output,
        } => {
            let output = output.unwrap_or_else(|| std::env::temp_dir().join("inibuf-bench.ini"));
            let report = run_benchmark(&file, &output, iterations, options)?;
            writeln!(
                out,
                "{} iteration(s) over {} section(s): mean {:?}, total {:?}",
                report.iterations,
                report.sections,
                report.mean(),
                report.total
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
