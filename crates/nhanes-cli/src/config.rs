//! Locations and options for one pipeline run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use nhanes_model::{IndicatorPolicy, RESULT_SUBDIRS};

pub const DEFAULT_DATA_DIR: &str = "data/raw";
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/prepared_sleep_analysis_data.csv";
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Explicit configuration handed to every stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Directory holding the raw survey extracts.
    pub data_dir: PathBuf,
    /// Where the prepared dataset is written.
    pub output_path: PathBuf,
    /// Root of the `figures/`, `tables/`, `models/` tree.
    pub results_dir: PathBuf,
    /// Whether the depression screener joins the merge.
    pub include_depression: bool,
    pub indicator_policy: IndicatorPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            include_depression: true,
            indicator_policy: IndicatorPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration rooted at a project directory, using the default layout below it.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            data_dir: root.join(DEFAULT_DATA_DIR),
            output_path: root.join(DEFAULT_OUTPUT_PATH),
            results_dir: root.join(DEFAULT_RESULTS_DIR),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_depression(mut self, include: bool) -> Self {
        self.include_depression = include;
        self
    }

    #[must_use]
    pub fn with_indicator_policy(mut self, policy: IndicatorPolicy) -> Self {
        self.indicator_policy = policy;
        self
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.results_dir.join("tables")
    }

    /// Create the results tree if it does not exist yet.
    pub fn ensure_results_tree(&self) -> io::Result<()> {
        for subdir in RESULT_SUBDIRS {
            fs::create_dir_all(self.results_dir.join(subdir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_project_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/raw"));
        assert_eq!(
            config.output_path,
            PathBuf::from("data/processed/prepared_sleep_analysis_data.csv")
        );
        assert!(config.include_depression);
        assert_eq!(config.indicator_policy, IndicatorPolicy::Coerce);
        assert_eq!(config.tables_dir(), PathBuf::from("results/tables"));
    }

    #[test]
    fn results_tree_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::rooted_at(dir.path());
        config.ensure_results_tree().unwrap();
        for subdir in RESULT_SUBDIRS {
            assert!(dir.path().join("results").join(subdir).is_dir());
        }
    }
}
