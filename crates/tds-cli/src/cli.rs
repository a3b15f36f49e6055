//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tds_transform::CategoryPolicy;

#[derive(Parser)]
#[command(
    name = "tds",
    version,
    about = "Reshape provider time & distance standards into flat records",
    long_about = "Download a published provider time & distance workbook, rebuild its\n\
                  three-row header, and flatten each county row into one record per\n\
                  specialty with time and distance values, stored in SQLite or CSV."
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
    /// Download the configured workbook and refresh the SQLite table.
    Run(RunArgs),

    /// Reshape a local CSV or workbook file.
    Reshape(ReshapeArgs),

    /// Show how a sheet's columns are classified.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// JSON configuration file.
    #[arg(long = "config", value_name = "FILE", default_value = "JsonConfigFile.json")]
    pub config: PathBuf,

    /// Reuse an already downloaded workbook instead of fetching it.
    #[arg(long = "skip-download")]
    pub skip_download: bool,
}

#[derive(Parser)]
pub struct ReshapeArgs {
    /// CSV or workbook (xlsx, xls, xlsb, ods) to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sheet name (required for workbooks).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// How categories within a row become records.
    #[arg(long = "policy", value_enum, default_value = "per-category")]
    pub policy: PolicyArg,

    /// Banner rows above the three header rows.
    #[arg(long = "skip-rows", value_name = "N", default_value_t = 1)]
    pub skip_rows: usize,

    /// Metadata column keys (repeatable; defaults to the standard geography keys).
    #[arg(long = "metadata-key", value_name = "KEY")]
    pub metadata_keys: Vec<String>,

    /// SQLite database to write.
    #[arg(long = "database", value_name = "DB", conflicts_with = "csv")]
    pub database: Option<PathBuf>,

    /// Table name inside the database.
    #[arg(long = "table", value_name = "TABLE", default_value = "time_distance_data")]
    pub table: String,

    /// Write records to a CSV file instead.
    #[arg(long = "csv", value_name = "OUT")]
    pub csv: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CSV or workbook to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sheet name (required for workbooks; omit to list sheets).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Banner rows above the three header rows.
    #[arg(long = "skip-rows", value_name = "N", default_value_t = 1)]
    pub skip_rows: usize,
}

/// CLI category policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    PerCategory,
    LastWins,
}

impl From<PolicyArg> for CategoryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PerCategory => CategoryPolicy::PerCategory,
            PolicyArg::LastWins => CategoryPolicy::LastWins,
        }
    }
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
