//! Raw table discovery and loading.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use nhanes_model::SurveyTopic;
use nhanes_model::variables::SEQN;

use crate::csv::read_raw_csv;
use crate::error::{DataSourceError, Result};
use crate::frame::{SourceFormat, SurveyTable, SurveyTables};
use crate::polars::{column_f64, format_numeric};

/// Whether a topic's raw file is present in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub topic: SurveyTopic,
    /// The file that would be read, or the expected transport path when absent.
    pub path: PathBuf,
    pub format: Option<SourceFormat>,
}

impl SourceStatus {
    pub fn is_present(&self) -> bool {
        self.format.is_some()
    }
}

/// Find the file for `topic`: the transport file first, then a CSV export.
///
/// Extensions match case-insensitively, since NHANES downloads use `.XPT`.
pub fn locate_source(dir: &Path, topic: SurveyTopic) -> Option<(PathBuf, SourceFormat)> {
    [SourceFormat::Xpt, SourceFormat::Csv]
        .into_iter()
        .find_map(|format| {
            let lower = dir.join(format!("{}.{}", topic.file_stem(), format.extension()));
            let upper = dir.join(format!(
                "{}.{}",
                topic.file_stem(),
                format.extension().to_ascii_uppercase()
            ));
            [lower, upper]
                .into_iter()
                .find(|path| path.is_file())
                .map(|path| (path, format))
        })
}

/// Presence of every topic's raw file, in merge order.
pub fn source_status(dir: &Path) -> Vec<SourceStatus> {
    SurveyTopic::ALL
        .into_iter()
        .map(|topic| match locate_source(dir, topic) {
            Some((path, format)) => SourceStatus {
                topic,
                path,
                format: Some(format),
            },
            None => SourceStatus {
                topic,
                path: expected_path(dir, topic),
                format: None,
            },
        })
        .collect()
}

fn expected_path(dir: &Path, topic: SurveyTopic) -> PathBuf {
    dir.join(format!("{}.xpt", topic.file_stem()))
}

/// Load one topic table and check its `SEQN` column.
pub fn load_topic(dir: &Path, topic: SurveyTopic) -> Result<SurveyTable> {
    let (path, format) =
        locate_source(dir, topic).ok_or_else(|| DataSourceError::FileNotFound {
            topic,
            path: expected_path(dir, topic),
        })?;

    let data = match format {
        SourceFormat::Xpt => {
            let dataset =
                nhanes_xpt::read_xpt(&path).map_err(|source| DataSourceError::Xpt {
                    topic,
                    path: path.clone(),
                    source,
                })?;
            debug!(
                topic = %topic,
                member = %dataset.name,
                created = ?dataset.created,
                special_missing = dataset.special_missing,
                "read transport member"
            );
            nhanes_xpt::dataset_to_dataframe(&dataset).map_err(|source| {
                DataSourceError::Xpt {
                    topic,
                    path: path.clone(),
                    source,
                }
            })?
        }
        SourceFormat::Csv => read_raw_csv(&path).map_err(|e| DataSourceError::CsvParse {
            topic,
            path: path.clone(),
            message: e.to_string(),
        })?,
    };

    validate_key(topic, &path, &data)?;

    let table = SurveyTable::new(topic, &path, format, data);
    info!(
        topic = %topic,
        path = %path.display(),
        format = %format,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded survey table"
    );
    Ok(table)
}

/// `SEQN` must exist and be unique among non-missing values.
fn validate_key(topic: SurveyTopic, path: &Path, data: &DataFrame) -> Result<()> {
    if data.column(SEQN).is_err() {
        return Err(DataSourceError::MissingKey {
            topic,
            path: path.to_path_buf(),
        });
    }

    let keys = column_f64(data, SEQN)?;
    let mut seen = HashSet::with_capacity(keys.len());
    let mut missing = 0usize;
    for key in keys {
        match key {
            Some(value) => {
                if !seen.insert(value.to_bits()) {
                    return Err(DataSourceError::DuplicateKey {
                        topic,
                        path: path.to_path_buf(),
                        seqn: format_numeric(value),
                    });
                }
            }
            None => missing += 1,
        }
    }
    if missing > 0 {
        warn!(topic = %topic, rows = missing, "rows without SEQN will not join");
    }
    Ok(())
}

/// Load the raw tables of a survey cycle from `dir`.
///
/// The depression screener is only read when `include_depression` is set.
pub fn load_survey_tables(dir: &Path, include_depression: bool) -> Result<SurveyTables> {
    if !dir.is_dir() {
        return Err(DataSourceError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    Ok(SurveyTables {
        demographics: load_topic(dir, SurveyTopic::Demographics)?,
        sleep: load_topic(dir, SurveyTopic::Sleep)?,
        alcohol: load_topic(dir, SurveyTopic::Alcohol)?,
        smoking: load_topic(dir, SurveyTopic::Smoking)?,
        depression: include_depression
            .then(|| load_topic(dir, SurveyTopic::Depression))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_prefers_transport_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SLQ_J.csv"), "SEQN\n1\n").unwrap();
        assert_eq!(
            locate_source(dir.path(), SurveyTopic::Sleep).map(|(_, f)| f),
            Some(SourceFormat::Csv)
        );

        fs::write(dir.path().join("SLQ_J.XPT"), b"").unwrap();
        let (path, format) = locate_source(dir.path(), SurveyTopic::Sleep).unwrap();
        assert_eq!(format, SourceFormat::Xpt);
        assert!(path.ends_with("SLQ_J.XPT"));
    }

    #[test]
    fn test_source_status_reports_expected_path() {
        let dir = TempDir::new().unwrap();
        let status = source_status(dir.path());
        assert_eq!(status.len(), 5);
        assert!(status.iter().all(|s| !s.is_present()));
        assert!(status[0].path.ends_with("DEMO_J.xpt"));
    }

    #[test]
    fn test_duplicate_seqn_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ALQ_J.csv"), "SEQN,ALQ111\n1,1\n1,2\n").unwrap();
        let err = load_topic(dir.path(), SurveyTopic::Alcohol).unwrap_err();
        match err {
            DataSourceError::DuplicateKey { seqn, .. } => assert_eq!(seqn, "1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_seqn_column_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SMQ_J.csv"), "ID,SMQ020\n1,1\n").unwrap();
        let err = load_topic(dir.path(), SurveyTopic::Smoking).unwrap_err();
        assert!(matches!(err, DataSourceError::MissingKey { .. }));
    }
}
