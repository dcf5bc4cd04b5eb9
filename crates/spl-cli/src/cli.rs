//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "spl",
    version,
    about = "Structured Product Labeling checker",
    long_about = "Assemble, validate and build rendering contexts for Structured Product \
                  Labeling snapshots.\n\n\
                  Each snapshot is a JSON file holding the flat record tables of one \
                  document version."
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
    /// Process snapshots and report violations.
    Check(CheckArgs),

    /// List the validation rule catalog.
    Rules(RulesArgs),

    /// Show the vocabulary tables in use.
    Vocab(VocabArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Snapshot JSON files, one document version each.
    #[arg(value_name = "SNAPSHOT", required = true)]
    pub snapshots: Vec<PathBuf>,

    /// Validation policy (TOML) with severity overrides and a reject list.
    #[arg(long = "policy", value_name = "TOML")]
    pub policy: Option<PathBuf>,

    /// Directory of vocabulary CSV tables replacing the embedded ones
    /// (default: $SPL_VOCAB_DIR, then the embedded tables).
    #[arg(long = "vocab-dir", value_name = "DIR")]
    pub vocab_dir: Option<PathBuf>,

    /// Write the full JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any violation reaches this severity.
    ///
    /// Without it, only failed or policy-blocked documents fail the run.
    #[arg(long = "fail-on", value_enum)]
    pub fail_on: Option<SeverityArg>,

    /// Hide the per-violation table.
    #[arg(long = "no-violations")]
    pub no_violations: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Only list rules of this category.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,
}

#[derive(Parser)]
pub struct VocabArgs {
    /// Directory of vocabulary CSV tables replacing the embedded ones
    /// (default: $SPL_VOCAB_DIR, then the embedded tables).
    #[arg(long = "vocab-dir", value_name = "DIR")]
    pub vocab_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Reject,
    Error,
    Warning,
    Info,
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
