//! CLI argument definitions for the file-name auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cta-cli",
    version,
    about = "Audit document file names against the CTA naming convention",
    long_about = "Audit document file names against the CTA naming convention.\n\n\
                  Reads a CSV export of a document tracking sheet, suggests a compliant\n\
                  name for every row and writes an analyzed copy of the sheet."
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

    /// Include file names in debug and trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Rule table to use instead of the built-in one
    /// (falls back to CTA_RULES_PATH, then the built-in table).
    #[arg(long = "rules", value_name = "PATH", global = true)]
    pub rules: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit every file name in a tracking sheet (CSV).
    Audit(AuditArgs),

    /// Audit file names given on the command line.
    ///
    /// Exits with status 1 when any name needs attention.
    Check(CheckArgs),

    /// Show the active rule table.
    Rules,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Tracking sheet exported as CSV.
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,

    /// Analyzed sheet to write (default: <SHEET>_ANALYZED.csv beside the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a JSON report with every row and the summary.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Worker threads (default: available parallelism).
    #[arg(long = "workers", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// File names to audit.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: CheckFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CheckFormatArg {
    Table,
    Json,
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
