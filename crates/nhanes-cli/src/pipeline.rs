//! Preparation pipeline with explicit stages.
//!
//! 1. **Load**: read the five raw survey tables
//! 2. **Clean raw**: recode sentinel codes in every raw table
//! 3. **Derive**: sleep, smoking, alcohol and demographic variables
//! 4. **Merge**: inner join on `SEQN`, demographics first
//! 5. **Clean merged**: second sentinel pass over the joined table
//! 6. **Select**: project onto the analysis schema
//! 7. **Persist**: write the preparation report, then the prepared dataset
//!
//! Nothing is written until every earlier stage has succeeded.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use nhanes_ingest::{SourceFormat, SurveyTable, SurveyTables, load_survey_tables};
use nhanes_model::{IndicatorPolicy, KEY_SUMMARY_VARIABLES, SurveyTopic};
use nhanes_transform::{
    DatasetSummary, DeriveStage, absent_analysis_variables, clean_with_report,
    merge_survey_tables, select_analysis_variables, summarize,
};

use crate::config::PipelineConfig;
use crate::output::write_prepared_csv;
use crate::report::{PreparationReport, write_preparation_report};

/// Shape of one raw table as loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceEntry {
    pub topic: SurveyTopic,
    pub path: PathBuf,
    pub format: SourceFormat,
    pub rows: usize,
    pub columns: usize,
}

impl SourceEntry {
    fn from_table(table: &SurveyTable) -> Self {
        Self {
            topic: table.topic,
            path: table.source.clone(),
            format: table.format,
            rows: table.row_count(),
            columns: table.column_count(),
        }
    }
}

/// Table shape after a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: &'static str,
    pub rows: usize,
    pub columns: usize,
}

impl StageCount {
    fn of(stage: &'static str, df: &DataFrame) -> Self {
        Self {
            stage,
            rows: df.height(),
            columns: df.width(),
        }
    }
}

/// Everything the in-memory stages produce.
#[derive(Debug)]
pub struct Preparation {
    pub prepared: DataFrame,
    pub sources: Vec<SourceEntry>,
    pub stages: Vec<StageCount>,
    /// Sentinel cells recoded in the raw tables.
    pub recoded_raw: usize,
    /// Sentinel cells recoded in the merged table.
    pub recoded_merged: usize,
    /// Analysis variables missing from the merged table.
    pub absent_columns: Vec<&'static str>,
}

/// A completed run: the prepared dataset and where its outputs went.
#[derive(Debug)]
pub struct PreparationRun {
    pub preparation: Preparation,
    pub summary: DatasetSummary,
    pub output_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn load(config: &PipelineConfig) -> Result<SurveyTables> {
    let span = info_span!("load", data_dir = %config.data_dir.display());
    span.in_scope(|| -> Result<SurveyTables> {
        let start = Instant::now();
        let tables = load_survey_tables(&config.data_dir, config.include_depression)
            .context("load raw tables")?;
        info!(
            tables = tables.iter().count(),
            duration_ms = start.elapsed().as_millis(),
            "load complete"
        );
        Ok(tables)
    })
}

/// First sentinel pass, over every raw table.
pub fn clean_raw(tables: SurveyTables) -> Result<(SurveyTables, usize)> {
    info_span!("clean_raw").in_scope(|| -> Result<(SurveyTables, usize)> {
        let mut recoded = 0;
        let tables = tables.try_map(|table| -> Result<SurveyTable> {
            let (data, report) = clean_with_report(&table.data, None)
                .with_context(|| format!("clean {}", table.topic.file_stem()))?;
            debug!(
                topic = %table.topic,
                recoded = report.total(),
                columns = report.columns_touched(),
                "recoded sentinel codes"
            );
            recoded += report.total();
            Ok(table.with_data(data))
        })?;
        info!(recoded, "raw tables cleaned");
        Ok((tables, recoded))
    })
}

/// Run each topic's derivation on its own table.
pub fn derive(tables: SurveyTables, policy: IndicatorPolicy) -> Result<SurveyTables> {
    info_span!("derive", policy = %policy).in_scope(|| -> Result<SurveyTables> {
        if policy == IndicatorPolicy::Coerce {
            info!("indicators read a missing input as false");
        }
        tables.try_map(|table| -> Result<SurveyTable> {
            let Some(stage) = DeriveStage::for_topic(table.topic) else {
                return Ok(table);
            };
            let data = stage
                .apply(&table.data, policy)
                .with_context(|| format!("{stage} on {}", table.topic.file_stem()))?;
            debug!(topic = %table.topic, columns = data.width(), "derived variables");
            Ok(table.with_data(data))
        })
    })
}

/// Run every in-memory stage after loading.
pub fn prepare(tables: SurveyTables, policy: IndicatorPolicy) -> Result<Preparation> {
    let sources: Vec<SourceEntry> = tables.iter().map(SourceEntry::from_table).collect();
    let mut stages = Vec::new();

    let (tables, recoded_raw) = clean_raw(tables)?;
    let tables = derive(tables, policy)?;

    let merged = info_span!("merge").in_scope(|| -> Result<DataFrame> {
        let merged = merge_survey_tables(&tables).context("merge survey tables")?;
        info!(rows = merged.height(), columns = merged.width(), "merge complete");
        Ok(merged)
    })?;
    stages.push(StageCount::of("merge", &merged));

    // Second pass: the merged table is cleaned again as a separate step.
    let (cleaned, merged_report) = info_span!("clean_merged")
        .in_scope(|| clean_with_report(&merged, None))
        .context("clean merged table")?;
    info!(recoded = merged_report.total(), "merged table cleaned");
    stages.push(StageCount::of("clean merged", &cleaned));

    let absent_columns = absent_analysis_variables(&cleaned);
    if !absent_columns.is_empty() {
        warn!(columns = ?absent_columns, "analysis variables absent from merged table");
    }
    let prepared = info_span!("select")
        .in_scope(|| select_analysis_variables(&cleaned))
        .context("select analysis variables")?;
    info!(
        rows = prepared.height(),
        columns = prepared.width(),
        "selection complete"
    );
    stages.push(StageCount::of("select", &prepared));

    Ok(Preparation {
        prepared,
        sources,
        stages,
        recoded_raw,
        recoded_merged: merged_report.total(),
        absent_columns,
    })
}

/// Load, prepare, and persist the prepared dataset and its report.
pub fn run_preparation(config: &PipelineConfig) -> Result<PreparationRun> {
    let start = Instant::now();
    let tables = load(config)?;
    let preparation = prepare(tables, config.indicator_policy)?;

    let summary = summarize(&preparation.prepared, &KEY_SUMMARY_VARIABLES)
        .context("summarize prepared dataset")?;

    // The report goes first and is removed again if the dataset cannot be
    // written, so a failed run leaves neither artifact behind.
    let (output_path, report_path) = info_span!("persist").in_scope(|| -> Result<(PathBuf, PathBuf)> {
        config
            .ensure_results_tree()
            .with_context(|| format!("create {}", config.results_dir.display()))?;
        let report = PreparationReport::new(config, &preparation, &summary);
        let report_path = write_preparation_report(&config.tables_dir(), &report)
            .context("write preparation report")?;
        match write_prepared_csv(&preparation.prepared, &config.output_path) {
            Ok(output_path) => Ok((output_path, report_path)),
            Err(error) => {
                let _ = fs::remove_file(&report_path);
                Err(error.context("write prepared dataset"))
            }
        }
    })?;

    info!(
        rows = preparation.prepared.height(),
        duration_ms = start.elapsed().as_millis(),
        "preparation complete"
    );
    Ok(PreparationRun {
        preparation,
        summary,
        output_path,
        report_path,
    })
}
