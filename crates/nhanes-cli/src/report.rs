//! JSON record of a preparation run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use nhanes_model::ANALYSIS_SCHEMA_VERSION;
use nhanes_transform::DatasetSummary;

use crate::config::PipelineConfig;
use crate::pipeline::{Preparation, SourceEntry, StageCount};

pub const REPORT_FILE: &str = "preparation_report.json";

#[derive(Debug, Serialize)]
pub struct PreparationReport<'a> {
    pub schema_version: u32,
    pub generated_at: String,
    pub config: &'a PipelineConfig,
    pub sources: &'a [SourceEntry],
    pub stages: &'a [StageCount],
    pub recoded_raw: usize,
    pub recoded_merged: usize,
    pub absent_columns: &'a [&'static str],
    pub summary: &'a DatasetSummary,
}

impl<'a> PreparationReport<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        preparation: &'a Preparation,
        summary: &'a DatasetSummary,
    ) -> Self {
        Self {
            schema_version: ANALYSIS_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            config,
            sources: &preparation.sources,
            stages: &preparation.stages,
            recoded_raw: preparation.recoded_raw,
            recoded_merged: preparation.recoded_merged,
            absent_columns: &preparation.absent_columns,
            summary,
        }
    }
}

pub fn write_preparation_report(tables_dir: &Path, report: &PreparationReport<'_>) -> Result<PathBuf> {
    fs::create_dir_all(tables_dir)?;
    let output_path = tables_dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
