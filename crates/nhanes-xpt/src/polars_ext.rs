//! Conversion of transport members into polars data frames.
//!
//! Numeric variables become `Float64` columns with missing codes as nulls.
//! Character variables become `String` columns; blank values become nulls.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::types::{XptDataset, XptType, XptValue};

/// Convert a parsed member into a [`DataFrame`] with one column per variable.
pub fn dataset_to_dataframe(dataset: &XptDataset) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(dataset.num_columns());

    for (index, column) in dataset.columns.iter().enumerate() {
        let series = match column.data_type {
            XptType::Num => {
                let values: Vec<Option<f64>> = dataset
                    .column_values(index)
                    .map(XptValue::as_f64)
                    .collect();
                Series::new(column.name.as_str().into(), values)
            }
            XptType::Char => {
                let values: Vec<Option<&str>> = dataset
                    .column_values(index)
                    .map(|value| value.as_str().filter(|text| !text.trim().is_empty()))
                    .collect();
                Series::new(column.name.as_str().into(), values)
            }
        };
        columns.push(series.into());
    }

    Ok(DataFrame::new(columns)?)
}
