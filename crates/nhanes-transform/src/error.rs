//! Error types for table transformations.

use polars::prelude::PolarsError;
use thiserror::Error;

/// A transformation needed a column the table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} requires column {column}, which is absent")]
pub struct SchemaError {
    pub stage: &'static str,
    pub column: String,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("join suffix for {stage} must not be empty")]
    EmptySuffix { stage: &'static str },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Fail with a [`SchemaError`] naming the first absent column.
pub(crate) fn require_columns(
    df: &polars::prelude::DataFrame,
    stage: &'static str,
    columns: &[&str],
) -> Result<()> {
    match columns.iter().find(|name| df.column(name).is_err()) {
        Some(column) => Err(SchemaError {
            stage,
            column: (*column).to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_stage_and_column() {
        let err = TransformError::from(SchemaError {
            stage: "smoking derivation",
            column: "SMQ040".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "smoking derivation requires column SMQ040, which is absent"
        );
    }
}
