//! CLI argument definitions for the freight-prepaid converter.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use prepaid_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "prepaid",
    version,
    about = "Freight-prepaid converter - one shipping line per order",
    long_about = "Convert a multi-line-per-order shipment export into the \
                  one-line-per-order freight-prepaid format.\n\n\
                  Lines are grouped by order id, up to two products are merged \
                  into fixed slots and missing product names are collected \
                  before any output is written."
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

    /// Allow addresses and product names to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging setup from the global flags. An explicit `--log-level` beats
    /// `-v`/`-q`, and either one disables the `RUST_LOG` override.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
            },
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an export and write the freight-prepaid file.
    Convert(ConvertArgs),

    /// Show shape, warnings and missing names without writing anything.
    Inspect(InputArgs),
}

/// Options shared by every command that reads an export.
#[derive(Args)]
pub struct InputArgs {
    /// Headerless shipment export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Text encoding of the input and of every file written.
    #[arg(long = "encoding", value_enum, default_value = "shift-jis")]
    pub encoding: EncodingArg,

    /// What to do with orders holding more than two products.
    #[arg(long = "item-limit", value_enum, default_value = "reject")]
    pub item_limit: ItemLimitArg,

    /// What to do with orders holding no products.
    #[arg(long = "empty-group", value_enum, default_value = "reject")]
    pub empty_group: EmptyGroupArg,

    /// JSON file overriding the column positions.
    #[arg(long = "layout", value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Output file (default: <INPUT stem>_prepaid.csv).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Filled-in names template from an earlier run.
    #[arg(long = "names", value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Ask for missing product names on the terminal.
    #[arg(long = "interactive")]
    pub interactive: bool,

    /// Where to write the names template (default: <INPUT stem>_names.csv).
    #[arg(long = "pending-out", value_name = "FILE")]
    pub pending_out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    ShiftJis,
    #[value(name = "utf-8", alias = "utf8")]
    Utf8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ItemLimitArg {
    /// Fail the whole run.
    Reject,
    /// Keep the first two products and warn.
    Truncate,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EmptyGroupArg {
    /// Fail the whole run.
    Reject,
    /// Emit the order with empty product slots.
    BaseOnly,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
