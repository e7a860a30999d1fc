//! CLI argument definitions for the preparation pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use nhanes_cli::config::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_PATH, DEFAULT_RESULTS_DIR};
use nhanes_model::IndicatorPolicy;
use nhanes_transform::TOP_MISSING;

#[derive(Parser)]
#[command(
    name = "nhanes-prep",
    version,
    about = "Prepare NHANES 2017-2018 survey data for the sleep, smoking and alcohol analysis",
    long_about = "Prepare NHANES 2017-2018 survey data for analysis.\n\n\
                  Reads the demographics, sleep, alcohol, smoking and depression extracts \
                  (SAS transport or CSV), recodes refusal codes to missing, derives the \
                  analysis variables, joins the tables on SEQN and writes one prepared CSV."
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
    /// Run the full preparation pipeline and write the prepared dataset.
    Prepare(PrepareArgs),

    /// Summarize an existing prepared dataset.
    Summary(DatasetArgs),

    /// Report how many complete cases each analysis model would use.
    Consumers(DatasetArgs),

    /// Write the correlation matrix of the prepared dataset.
    Correlate(CorrelateArgs),

    /// Check that all raw survey files are in place.
    Verify(VerifyArgs),
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Directory holding DEMO_J, SLQ_J, ALQ_J, SMQ_J and DPQ_J.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Path of the prepared CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Results tree (figures/, tables/, models/).
    #[arg(long = "results-dir", value_name = "DIR", default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Leave the depression screener out of the merge.
    #[arg(long = "no-depression")]
    pub no_depression: bool,

    /// How indicators treat a missing input.
    ///
    /// `coerce` counts a missing input as false, so indicators are never
    /// missing. `three-valued` keeps them missing and combines POOR_SLEEP with
    /// a Kleene OR.
    #[arg(long = "indicator-policy", value_enum, default_value = "coerce")]
    pub indicator_policy: IndicatorPolicyArg,

    /// Skip the summary tables after a successful run.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Parser)]
pub struct DatasetArgs {
    /// Prepared dataset to read.
    #[arg(long = "input", short = 'i', value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub input: PathBuf,

    /// Number of columns listed in the missing-data table.
    #[arg(long = "top", value_name = "N", default_value_t = TOP_MISSING)]
    pub top: usize,
}

#[derive(Parser)]
pub struct CorrelateArgs {
    /// Prepared dataset to read.
    #[arg(long = "input", short = 'i', value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub input: PathBuf,

    /// Results tree; the matrix goes to tables/.
    #[arg(long = "results-dir", value_name = "DIR", default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,
}

#[derive(Parser)]
pub struct VerifyArgs {
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IndicatorPolicyArg {
    Coerce,
    ThreeValued,
}

impl From<IndicatorPolicyArg> for IndicatorPolicy {
    fn from(arg: IndicatorPolicyArg) -> Self {
        match arg {
            IndicatorPolicyArg::Coerce => Self::Coerce,
            IndicatorPolicyArg::ThreeValued => Self::ThreeValued,
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
