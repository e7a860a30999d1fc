//! Polars value helpers shared by the pipeline crates.

use polars::prelude::{Column, DataFrame, DataType, PolarsResult};

/// Formats a numeric value as a plain decimal without trailing zeros.
///
/// Integral values print without a fractional part (`3`, not `3.0`).
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    // Display already yields the shortest round-trip decimal.
    format!("{v}")
}

/// True for the dtypes the pipeline treats as numeric survey columns.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Reads a column as a vector of optional `f64`.
///
/// Non-numeric values (including unparsable text) become `None`.
pub fn f64_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Reads a named column of a frame as a vector of optional `f64`.
pub fn column_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    f64_values(df.column(name)?)
}

/// Casts every integer, float and all-null column to `Float64`.
///
/// Text columns are left untouched.
pub fn normalize_numeric(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| match column.dtype() {
            DataType::Float64 | DataType::String => Ok(column.clone()),
            DataType::Null => column.cast(&DataType::Float64),
            dtype if is_numeric_dtype(dtype) => column.cast(&DataType::Float64),
            _ => Ok(column.clone()),
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(3.0), "3");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(93705.0), "93705");
        assert_eq!(format_numeric(7.5), "7.5");
        assert_eq!(format_numeric(-1.25), "-1.25");
        assert_eq!(format_numeric(0.1), "0.1");
    }

    #[test]
    fn test_normalize_numeric() {
        let df = DataFrame::new(vec![
            Series::new("SEQN".into(), vec![1i64, 2, 3]).into(),
            Series::new("NOTE".into(), vec!["a", "b", "c"]).into(),
            Series::new("SLD012".into(), vec![Some(7.5), None, Some(8.0)]).into(),
        ])
        .unwrap();

        let normalized = normalize_numeric(&df).unwrap();
        assert_eq!(normalized.column("SEQN").unwrap().dtype(), &DataType::Float64);
        assert_eq!(normalized.column("NOTE").unwrap().dtype(), &DataType::String);
        assert_eq!(
            column_f64(&normalized, "SLD012").unwrap(),
            vec![Some(7.5), None, Some(8.0)]
        );
    }
}
