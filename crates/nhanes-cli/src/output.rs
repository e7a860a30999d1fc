//! Persisted tables: the prepared dataset and the correlation matrix.
//!
//! Both are plain CSV. Numbers print as shortest plain decimals, integral
//! values without a fractional part, and missing values as empty fields.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, DataType, PlSmallStr};
use tracing::info;

use nhanes_ingest::polars::{f64_values, format_numeric, is_numeric_dtype};
use nhanes_ingest::read_raw_csv;
use nhanes_transform::CorrelationMatrix;

pub const CORRELATION_FILE: &str = "correlation_matrix.csv";

enum CellValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl CellValues {
    fn from_column(column: &Column) -> Result<Self> {
        if is_numeric_dtype(column.dtype()) {
            return Ok(Self::Numeric(f64_values(column)?));
        }
        let text = column.cast(&DataType::String)?;
        let values = text
            .str()?
            .into_iter()
            .map(|value| value.map(ToString::to_string))
            .collect();
        Ok(Self::Text(values))
    }

    fn field(&self, row: usize) -> String {
        match self {
            Self::Numeric(values) => values[row].map(format_numeric).unwrap_or_default(),
            Self::Text(values) => values[row].clone().unwrap_or_default(),
        }
    }
}

/// Write `df` to `path`, replacing any previous file only once the new one is complete.
///
/// Parent directories are created as needed.
pub fn write_prepared_csv(df: &DataFrame, path: &Path) -> Result<PathBuf> {
    let columns: Vec<CellValues> = df
        .get_columns()
        .iter()
        .map(CellValues::from_column)
        .collect::<Result<_>>()?;
    let header: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();

    let rows = (0..df.height()).map(|row| {
        columns
            .iter()
            .map(|column| column.field(row))
            .collect::<Vec<String>>()
    });
    write_atomic(path, &header, rows)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote prepared dataset"
    );
    Ok(path.to_path_buf())
}

/// Read a prepared dataset back; `AGE_GROUP` stays text, everything else is `Float64`.
pub fn read_prepared_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        anyhow::bail!(
            "prepared dataset not found: {} (run `nhanes-prep prepare` first)",
            path.display()
        );
    }
    read_raw_csv(path).with_context(|| format!("read {}", path.display()))
}

/// Write the matrix as a square CSV with the column names as header and first field.
pub fn write_correlation_csv(matrix: &CorrelationMatrix, tables_dir: &Path) -> Result<PathBuf> {
    let path = tables_dir.join(CORRELATION_FILE);
    let mut header = vec![""];
    header.extend(matrix.columns.iter().map(String::as_str));

    let rows = matrix.columns.iter().zip(&matrix.values).map(|(name, values)| {
        let mut record = vec![name.clone()];
        record.extend(
            values
                .iter()
                .map(|value| value.map(format_numeric).unwrap_or_default()),
        );
        record
    });
    write_atomic(&path, &header, rows)?;
    Ok(path)
}

fn write_atomic(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let temp_path = path.with_extension("csv.tmp");
    let result = (|| -> Result<()> {
        let mut writer = csv::Writer::from_path(&temp_path)
            .with_context(|| format!("create {}", temp_path.display()))?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    })();

    if let Err(error) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    if let Err(error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(error).with_context(|| {
            format!(
                "move {} into place at {}",
                temp_path.display(),
                path.display()
            )
        });
    }
    Ok(())
}
