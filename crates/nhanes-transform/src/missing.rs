//! Missing-data handling: listwise deletion and sparse-column dropping.
//!
//! No imputation is attempted.

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::info;

use crate::error::{Result, require_columns};

/// Default missing fraction above which [`drop_high_missing`] drops a column.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.5;

/// Drop every row with a missing value in `columns` (all columns when `None`).
///
/// A named column that does not exist is a schema error.
pub fn listwise_delete(df: &DataFrame, columns: Option<&[&str]>) -> Result<DataFrame> {
    let names: Vec<String> = match columns {
        Some(names) => {
            require_columns(df, "listwise deletion", names)?;
            names.iter().map(|name| (*name).to_string()).collect()
        }
        None => df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    };

    let mut keep = vec![true; df.height()];
    for name in &names {
        let nulls = df.column(name)?.is_null();
        for (row, is_null) in nulls.into_iter().enumerate() {
            if is_null.unwrap_or(false) {
                keep[row] = false;
            }
        }
    }

    let mask = Series::new("keep".into(), keep);
    let kept = df.filter(mask.bool()?)?;

    let dropped = df.height() - kept.height();
    let percent = if df.height() == 0 {
        0.0
    } else {
        dropped as f64 / df.height() as f64 * 100.0
    };
    info!(
        rows_before = df.height(),
        rows_after = kept.height(),
        dropped,
        dropped_pct = %format!("{percent:.1}"),
        "listwise deletion"
    );
    Ok(kept)
}

/// Drop columns whose missing fraction exceeds `threshold`.
///
/// Returns the reduced table and the names of the dropped columns. An empty
/// table drops nothing.
pub fn drop_high_missing(df: &DataFrame, threshold: f64) -> Result<(DataFrame, Vec<String>)> {
    if df.height() == 0 {
        return Ok((df.clone(), Vec::new()));
    }

    let height = df.height() as f64;
    let mut dropped = Vec::new();
    let mut kept = Vec::new();
    for column in df.get_columns() {
        let name = column.name().to_string();
        if column.null_count() as f64 / height > threshold {
            dropped.push(name);
        } else {
            kept.push(name);
        }
    }

    if !dropped.is_empty() {
        info!(columns = ?dropped, threshold, "dropped sparse columns");
    }
    Ok((df.select(kept)?, dropped))
}
