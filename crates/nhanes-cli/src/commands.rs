use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nhanes_cli::config::PipelineConfig;
use nhanes_cli::output::{read_prepared_csv, write_correlation_csv};
use nhanes_cli::pipeline::{PreparationRun, run_preparation};
use nhanes_ingest::{SourceStatus, source_status};
use nhanes_model::KEY_SUMMARY_VARIABLES;
use nhanes_transform::{
    ConsumerReadiness, DatasetSummary, check_consumers, missing_shares, pearson_matrix, summarize,
};

use crate::cli::{CorrelateArgs, DatasetArgs, PrepareArgs, VerifyArgs};

pub fn run_prepare(args: &PrepareArgs) -> Result<PreparationRun> {
    let config = PipelineConfig::default()
        .with_data_dir(&args.data_dir)
        .with_output_path(&args.output)
        .with_results_dir(&args.results_dir)
        .with_depression(!args.no_depression)
        .with_indicator_policy(args.indicator_policy.into());
    run_preparation(&config)
}

pub fn run_summary(args: &DatasetArgs) -> Result<DatasetSummary> {
    let df = read_prepared_csv(&args.input)?;
    let mut summary =
        summarize(&df, &KEY_SUMMARY_VARIABLES).context("summarize prepared dataset")?;
    summary.missing = missing_shares(&df).into_iter().take(args.top).collect();
    Ok(summary)
}

pub fn run_consumers(args: &DatasetArgs) -> Result<Vec<ConsumerReadiness>> {
    let df = read_prepared_csv(&args.input)?;
    let report = check_consumers(&df).context("check analysis consumers")?;
    for readiness in &report {
        info!(
            consumer = readiness.consumer.name(),
            complete_cases = readiness.complete_cases,
            dropped = df.height() - readiness.complete_cases,
            "consumer readiness"
        );
    }
    Ok(report)
}

pub fn run_correlate(args: &CorrelateArgs) -> Result<PathBuf> {
    let span = info_span!("correlate", input = %args.input.display());
    let _guard = span.enter();
    let df = read_prepared_csv(&args.input)?;
    let matrix = pearson_matrix(&df).context("compute correlation matrix")?;
    let config = PipelineConfig::default().with_results_dir(&args.results_dir);
    config
        .ensure_results_tree()
        .with_context(|| format!("create {}", args.results_dir.display()))?;
    let path = write_correlation_csv(&matrix, &config.tables_dir())
        .context("write correlation matrix")?;
    info!(columns = matrix.columns.len(), path = %path.display(), "wrote correlation matrix");
    Ok(path)
}

pub fn run_verify(args: &VerifyArgs) -> Vec<SourceStatus> {
    source_status(&args.data_dir)
}
