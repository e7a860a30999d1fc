//! Pairwise Pearson correlation over the numeric columns of a table.

use polars::prelude::DataFrame;
use serde::Serialize;

use nhanes_ingest::polars::{f64_values, is_numeric_dtype};

use crate::error::Result;

/// Square correlation matrix; `values[i][j]` correlates `columns[i]` with `columns[j]`.
///
/// A cell is `None` when fewer than two rows have both values or when either
/// side has zero variance over those rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// Pearson correlation over the rows where both values are present.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Correlate every numeric column with every other, in column order.
///
/// Text columns are skipped.
pub fn pearson_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let mut columns = Vec::new();
    let mut data = Vec::new();
    for column in df.get_columns() {
        if is_numeric_dtype(column.dtype()) {
            columns.push(column.name().to_string());
            data.push(f64_values(column)?);
        }
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&data[i], &data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn perfect_and_inverse() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let up = [Some(2.0), Some(4.0), Some(6.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&x, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pairwise_complete_rows_only() {
        let x = [Some(1.0), None, Some(2.0), Some(3.0)];
        let y = [Some(1.0), Some(100.0), Some(2.0), Some(3.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_have_no_correlation() {
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        assert_eq!(
            pearson(&[Some(1.0), Some(1.0)], &[Some(2.0), Some(3.0)]),
            None
        );
    }

    #[test]
    fn matrix_skips_text_columns() {
        let df = DataFrame::new(vec![
            Series::new("SEQN".into(), vec![1.0, 2.0, 3.0]).into(),
            Series::new("AGE_GROUP".into(), vec!["18-29", "30-44", "60+"]).into(),
            Series::new("RIDAGEYR".into(), vec![20.0, 35.0, 70.0]).into(),
        ])
        .unwrap();

        let matrix = pearson_matrix(&df).unwrap();
        assert_eq!(matrix.columns, vec!["SEQN", "RIDAGEYR"]);
        assert!((matrix.values[0][0].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(matrix.values[0][1], matrix.values[1][0]);
        assert_eq!(matrix.values.len(), 2);
    }
}
