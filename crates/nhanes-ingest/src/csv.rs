//! CSV exports of survey tables.
//!
//! Accepted in place of a transport file: one header row of variable names,
//! empty cells as missing. A column is numeric when every non-empty cell
//! parses as a number; anything else stays text.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, PolarsResult, SerReader};

use crate::polars::normalize_numeric;

/// Reads a CSV export into a DataFrame with `Float64` numeric columns.
pub fn read_raw_csv(path: &Path) -> PolarsResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        // Scan every row so a late non-numeric cell keeps the column as text.
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    normalize_numeric(&df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_integer_columns_become_float() {
        let file = create_temp_csv("SEQN,SLQ050,SLD012\n1,1,7.5\n2,,8\n");
        let df = read_raw_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("SEQN").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("SLQ050").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("SLQ050").unwrap().null_count(), 1);
    }

    #[test]
    fn test_text_columns_stay_text() {
        let file = create_temp_csv("SEQN,SLQ300\n1,23:00\n2,22:30\n");
        let df = read_raw_csv(file.path()).unwrap();
        assert_eq!(df.column("SLQ300").unwrap().dtype(), &DataType::String);
    }
}
