//! CLI argument definitions for yardex.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "yardex",
    version,
    about = "Normalize YARA rule metadata into searchable documents",
    long_about = "Parse YARA rule files and normalize their metadata.\n\n\
                  Metadata keys are mapped to a canonical vocabulary, dates are\n\
                  rewritten as YYYY-MM-DD, and rule names are split into tags."
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

    /// Configuration file (default: $YARDEX_CONFIG, then ./yardex.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Metadata alias table (overrides the configured or bundled table).
    #[arg(long = "aliases", value_name = "PATH", global = true)]
    pub aliases: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse rule files and write normalized documents as JSON lines.
    Import(ImportArgs),

    /// Parse rule files and export rules as YARA source or a JSON array.
    Export(ExportArgs),

    /// List canonical metadata fields and their aliases.
    Fields,

    /// Count distinct values of a field across all rules.
    Values(ValuesArgs),
}

/// Rule file selection shared by the subcommands that read rules.
#[derive(Args)]
pub struct InputArgs {
    /// Rule file or directory of rule files.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Descend into sub-directories.
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Rule file extensions (comma-separated; default from config, else yar,yara).
    #[arg(short = 'e', long = "extensions", value_delimiter = ',', value_name = "EXT")]
    pub extensions: Option<Vec<String>>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: <export_dir>/documents.jsonl).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Export format.
    #[arg(short = 'f', long = "format", value_enum, default_value = "yara")]
    pub format: ExportFormatArg,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Field to summarize: nameTags, authorTags, ruleName, rulesetName, or a metadata field.
    #[arg(long = "field", value_name = "NAME")]
    pub field: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Yara,
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
