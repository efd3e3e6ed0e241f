//! CLI argument definitions for the cartogram pipeline.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use colorchoice_clap::Color;

use cartogram_model::FailurePolicy;
use cartogram_runner::DEFAULT_BINARY;

#[derive(Parser)]
#[command(
    name = "cartogram-pipeline",
    version,
    about = "Prepare a map and its region data, then generate a cartogram",
    long_about = "Run the external cartogram binary over a map.\n\n\
                  The map is normalized first, the region table written by that pass is \
                  rewritten with values taken from the map's feature attributes, and the \
                  binary is run again to produce the cartogram."
)]
pub struct Cli {
    /// Input map (GeoJSON). Derived files are written beside it.
    #[arg(short = 'd', long = "dataset", value_name = "PATH")]
    pub dataset: PathBuf,

    /// Feature attribute holding the region name.
    #[arg(
        short = 'n',
        long = "name_field",
        visible_alias = "name-field",
        value_name = "ATTR"
    )]
    pub name_field: String,

    /// Feature attribute holding the numeric region value.
    #[arg(short = 'v', long = "value", value_name = "ATTR")]
    pub value: String,

    /// Factor applied to every region value.
    #[arg(
        short = 's',
        long = "scaling",
        value_name = "FLOAT",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    pub scaling: f64,

    /// External cartogram binary.
    #[arg(long = "binary", value_name = "PATH", default_value = DEFAULT_BINARY)]
    pub binary: PathBuf,

    /// What to do when the external binary exits unsuccessfully.
    #[arg(long = "on-failure", value_enum, default_value = "continue")]
    pub on_failure: FailurePolicyArg,

    /// Keep derived files from a previous run instead of removing them first.
    #[arg(long = "skip-cleanup")]
    pub skip_cleanup: bool,

    /// Increase log verbosity (--verbose for debug, twice for trace).
    #[arg(long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q for warnings, -qq for errors only).
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::Count,
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: u8,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides --verbose/--quiet).
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

impl Cli {
    /// Whether the user picked a verbosity explicitly.
    pub fn verbosity_is_explicit(&self) -> bool {
        self.verbose > 0 || self.quiet > 0 || self.log_level.is_some()
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FailurePolicyArg {
    /// Report the failure and keep going.
    Continue,
    /// Report the failure and stop.
    Halt,
}

impl From<FailurePolicyArg> for FailurePolicy {
    fn from(value: FailurePolicyArg) -> Self {
        match value {
            FailurePolicyArg::Continue => FailurePolicy::Continue,
            FailurePolicyArg::Halt => FailurePolicy::Halt,
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
