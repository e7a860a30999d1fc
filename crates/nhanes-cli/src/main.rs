//! `nhanes-prep`: NHANES survey preparation CLI.

use clap::{ColorChoice, Parser};
use nhanes_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_consumers, run_correlate, run_prepare, run_summary, run_verify};
use crate::summary::{print_consumers, print_dataset_summary, print_preparation, print_sources};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Prepare(args) => match run_prepare(&args) {
            Ok(run) => {
                print_preparation(&run);
                if !args.no_summary {
                    println!();
                    print_dataset_summary(&run.summary);
                }
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Summary(args) => match run_summary(&args) {
            Ok(summary) => {
                print_dataset_summary(&summary);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Consumers(args) => match run_consumers(&args) {
            Ok(report) => {
                print_consumers(&report);
                if report.iter().all(|readiness| readiness.is_ready()) { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
        Command::Correlate(args) => match run_correlate(&args) {
            Ok(path) => {
                println!("Correlation matrix: {}", path.display());
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Verify(args) => {
            let statuses = run_verify(&args);
            print_sources(&statuses);
            let missing = statuses.iter().filter(|status| !status.is_present()).count();
            if missing == 0 {
                println!("All {} survey files found.", statuses.len());
                0
            } else {
                eprintln!("{missing} survey file(s) missing from {}", args.data_dir.display());
                1
            }
        }
    };
    std::process::exit(exit_code);
}

/// Print an error with its context chain and return the failure exit code.
fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
