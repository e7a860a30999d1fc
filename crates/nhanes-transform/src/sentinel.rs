//! Recoding of refused / don't-know / not-applicable codes to missing.
//!
//! The pipeline runs this twice: once on every raw table before derivation,
//! and once on the merged table. Both passes are the same pure operation;
//! a second pass over clean data recodes nothing.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use nhanes_ingest::polars::{f64_values, is_numeric_dtype};
use nhanes_model::is_sentinel;

use crate::error::Result;

/// Per-column counts of recoded cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub recoded: BTreeMap<String, usize>,
}

impl CleanReport {
    pub fn total(&self) -> usize {
        self.recoded.values().sum()
    }

    pub fn columns_touched(&self) -> usize {
        self.recoded.len()
    }
}

/// Replace sentinel codes with missing in the targeted columns.
///
/// `columns = None` targets every numeric column. Named columns that are
/// absent or non-numeric are skipped. The input frame is not modified.
pub fn clean(df: &DataFrame, columns: Option<&[&str]>) -> Result<DataFrame> {
    clean_with_report(df, columns).map(|(cleaned, _)| cleaned)
}

/// [`clean`], also returning how many cells were recoded per column.
pub fn clean_with_report(
    df: &DataFrame,
    columns: Option<&[&str]>,
) -> Result<(DataFrame, CleanReport)> {
    let mut cleaned = df.clone();
    let mut report = CleanReport::default();

    let targets: Vec<String> = match columns {
        Some(names) => names.iter().map(|name| (*name).to_string()).collect(),
        None => df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    };

    for name in &targets {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }

        let mut recoded = 0usize;
        let values: Vec<Option<f64>> = f64_values(column)?
            .into_iter()
            .map(|value| match value {
                Some(v) if is_sentinel(v) => {
                    recoded += 1;
                    None
                }
                other => other,
            })
            .collect();

        if recoded > 0 {
            debug!(column = %name, recoded, "recoded sentinel values");
            cleaned.with_column(Series::new(name.as_str().into(), values))?;
            report.recoded.insert(name.clone(), recoded);
        }
    }

    Ok((cleaned, report))
}
