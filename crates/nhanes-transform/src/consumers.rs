//! Readiness of the prepared table for each analysis consumer.

use polars::prelude::DataFrame;
use serde::Serialize;

use nhanes_model::AnalysisConsumer;

use crate::error::{Result, require_columns};
use crate::missing::listwise_delete;

/// What one consumer would see when it loads the prepared table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerReadiness {
    pub consumer: AnalysisConsumer,
    /// Required columns the table lacks.
    pub missing_columns: Vec<String>,
    /// Rows left after the consumer's own listwise deletion; zero when
    /// columns are missing.
    pub complete_cases: usize,
}

impl ConsumerReadiness {
    pub fn is_ready(&self) -> bool {
        self.missing_columns.is_empty() && self.complete_cases > 0
    }
}

/// Rows the consumer keeps after dropping rows missing any required column.
pub fn complete_cases(df: &DataFrame, consumer: AnalysisConsumer) -> Result<DataFrame> {
    let required = consumer.required_columns();
    require_columns(df, consumer.name(), required)?;
    listwise_delete(df, Some(required))
}

pub fn check_consumers(df: &DataFrame) -> Result<Vec<ConsumerReadiness>> {
    let mut report = Vec::with_capacity(AnalysisConsumer::ALL.len());
    for consumer in AnalysisConsumer::ALL {
        let missing_columns: Vec<String> = consumer
            .required_columns()
            .iter()
            .filter(|name| df.column(name).is_err())
            .map(ToString::to_string)
            .collect();
        let complete_cases = if missing_columns.is_empty() {
            complete_cases(df, consumer)?.height()
        } else {
            0
        };
        report.push(ConsumerReadiness {
            consumer,
            missing_columns,
            complete_cases,
        });
    }
    Ok(report)
}
