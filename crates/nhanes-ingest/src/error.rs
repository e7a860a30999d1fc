//! Error types for survey table ingestion.

use std::path::PathBuf;
use thiserror::Error;

use nhanes_model::SurveyTopic;

/// Errors raised while loading raw survey tables.
///
/// Every variant is fatal: the pipeline aborts before any transformation.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Raw data directory not found.
    #[error("raw data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Neither the transport file nor a CSV export exists for a topic.
    #[error("{topic} table not found: expected {path}")]
    FileNotFound { topic: SurveyTopic, path: PathBuf },

    /// Transport file could not be parsed.
    #[error("failed to read {topic} table {path}: {source}")]
    Xpt {
        topic: SurveyTopic,
        path: PathBuf,
        #[source]
        source: nhanes_xpt::XptError,
    },

    /// CSV export could not be parsed.
    #[error("failed to parse {topic} table {path}: {message}")]
    CsvParse {
        topic: SurveyTopic,
        path: PathBuf,
        message: String,
    },

    /// Table has no `SEQN` column.
    #[error("{topic} table {path} has no SEQN column")]
    MissingKey { topic: SurveyTopic, path: PathBuf },

    /// The same `SEQN` appears on more than one row.
    #[error("{topic} table {path} has duplicate SEQN {seqn}")]
    DuplicateKey {
        topic: SurveyTopic,
        path: PathBuf,
        seqn: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for DataSourceError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, DataSourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataSourceError::FileNotFound {
            topic: SurveyTopic::Sleep,
            path: PathBuf::from("data/raw/SLQ_J.xpt"),
        };
        assert_eq!(err.to_string(), "slq table not found: expected data/raw/SLQ_J.xpt");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("SEQN".into());
        let err: DataSourceError = polars_err.into();
        assert!(matches!(err, DataSourceError::DataFrame { .. }));
    }
}
