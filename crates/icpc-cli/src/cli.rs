//! CLI argument definitions for the ICPC loader.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use icpc_ingest::SheetLayout;

#[derive(Parser)]
#[command(
    name = "icpc-loader",
    version,
    about = "ICPC subject loader - map submission sheets to canonical subject records",
    long_about = "Map ICPC subject submission sheets (CSV exports) to canonical subject records.\n\n\
                  Every header label must match a known field. Values are validated,\n\
                  normalized and post-processed, and each anomaly is reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a subject sheet and write canonical records as JSON lines.
    Load(LoadArgs),

    /// Check that every header column of a subject sheet maps to a field.
    Check(SheetArgs),

    /// List the known fields.
    Fields(FieldsArgs),
}

/// Options shared by every command that reads a sheet.
#[derive(Args)]
pub struct SheetArgs {
    /// Subject sheet exported as CSV.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field table to use instead of the built-in one.
    #[arg(long = "fields", value_name = "CSV")]
    pub fields: Option<PathBuf>,

    /// Zero-based row holding the header labels.
    #[arg(long = "header-row", default_value_t = SheetLayout::DEFAULT_HEADER_ROW)]
    pub header_row: usize,

    /// Zero-based row of the first subject.
    #[arg(long = "first-data-row", default_value_t = SheetLayout::DEFAULT_FIRST_DATA_ROW)]
    pub first_data_row: usize,

    /// Project that reported creatinine in µmol/L (repeatable; default 7 and 37).
    #[arg(long = "creatinine-umol-project", value_name = "PROJECT")]
    pub creatinine_umol_projects: Vec<u32>,

    /// Allow raw subject values in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Output file (default: subjects-<timestamp>.jsonl next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Map and report without writing records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct FieldsArgs {
    /// Only list fields surfaced in reports.
    #[arg(long = "reportable")]
    pub reportable: bool,

    /// Field table to use instead of the built-in one.
    #[arg(long = "fields", value_name = "CSV")]
    pub fields: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
