//! Post-preparation dataset summary: missingness and descriptive statistics.

use serde::Serialize;

use polars::prelude::DataFrame;

use nhanes_ingest::polars::{column_f64, is_numeric_dtype};

use crate::error::Result;

/// Number of columns listed in the missing-data section.
pub const TOP_MISSING: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingShare {
    pub column: String,
    pub missing: usize,
    pub percent: f64,
}

/// Descriptive statistics of one numeric column over its non-missing values.
///
/// Quartiles use linear interpolation between order statistics; `std` is
/// the sample standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    /// Columns with any missing value, most missing first, at most [`TOP_MISSING`].
    pub missing: Vec<MissingShare>,
    pub statistics: Vec<ColumnStatistics>,
}

/// Missing share of every column that has missing values, most missing first.
///
/// Ties keep column order.
pub fn missing_shares(df: &DataFrame) -> Vec<MissingShare> {
    let height = df.height();
    if height == 0 {
        return Vec::new();
    }
    let mut shares: Vec<MissingShare> = df
        .get_columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| MissingShare {
            column: column.name().to_string(),
            missing: column.null_count(),
            percent: column.null_count() as f64 / height as f64 * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.missing.cmp(&a.missing));
    shares
}

pub fn describe(column: &str, values: &[Option<f64>]) -> ColumnStatistics {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);

    let count = present.len();
    let mean = (count > 0).then(|| present.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|mean| {
        let squares: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });

    ColumnStatistics {
        column: column.to_string(),
        count,
        mean,
        std,
        min: present.first().copied(),
        q25: quantile(&present, 0.25),
        median: quantile(&present, 0.5),
        q75: quantile(&present, 0.75),
        max: present.last().copied(),
    }
}

fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Summarize the prepared dataset.
///
/// Statistics are computed for those `key_variables` that are present and
/// numeric.
pub fn summarize(df: &DataFrame, key_variables: &[&str]) -> Result<DatasetSummary> {
    let mut missing = missing_shares(df);
    missing.truncate(TOP_MISSING);

    let mut statistics = Vec::new();
    for name in key_variables {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        statistics.push(describe(name, &column_f64(df, name)?));
    }

    Ok(DatasetSummary {
        rows: df.height(),
        columns: df.width(),
        missing,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn describe_matches_hand_computation() {
        let stats = describe("X", &[Some(4.0), None, Some(1.0), Some(3.0), Some(2.0)]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, Some(2.5));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.q25, Some(1.75));
        assert_eq!(stats.median, Some(2.5));
        assert_eq!(stats.q75, Some(3.25));
        assert_eq!(stats.max, Some(4.0));
        let std = stats.std.unwrap();
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
    }

    #[test]
    fn describe_of_nothing() {
        let stats = describe("X", &[None, None]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.median, None);

        let single = describe("X", &[Some(5.0)]);
        assert_eq!(single.std, None);
        assert_eq!(single.median, Some(5.0));
    }

    #[test]
    fn missing_shares_sorted_descending() {
        let df = DataFrame::new(vec![
            Series::new("A".into(), vec![Some(1.0), None, Some(1.0), Some(1.0)]).into(),
            Series::new("B".into(), vec![1.0, 2.0, 3.0, 4.0]).into(),
            Series::new("C".into(), vec![None, None, Some(1.0), None]).into(),
        ])
        .unwrap();

        let shares = missing_shares(&df);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].column, "C");
        assert_eq!(shares[0].percent, 75.0);
        assert_eq!(shares[1].column, "A");

        let summary = summarize(&df, &["B", "Z"]).unwrap();
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.statistics.len(), 1);
        assert_eq!(summary.statistics[0].mean, Some(2.5));
    }
}
