//! Inner joins of the per-topic tables on `SEQN`.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame, IdxCa, IdxSize};
use tracing::debug;

use nhanes_ingest::SurveyTables;
use nhanes_ingest::polars::column_f64;
use nhanes_model::SurveyTopic;
use nhanes_model::variables::SEQN;

use crate::error::{Result, TransformError, require_columns};

/// Inner join `right` onto `left` by `SEQN`.
///
/// Output rows follow `left` order; a key repeated on the right yields one
/// row per match. Rows with a missing key never match. A `right` column whose
/// name is already taken is renamed with `suffix` appended, so columns of
/// `left` keep their names. An empty `suffix` is rejected.
pub fn inner_join(left: &DataFrame, right: &DataFrame, suffix: &str) -> Result<DataFrame> {
    if suffix.is_empty() {
        return Err(TransformError::EmptySuffix { stage: "merge" });
    }
    require_columns(left, "merge", &[SEQN])?;
    require_columns(right, "merge", &[SEQN])?;

    let mut right_index: HashMap<u64, Vec<IdxSize>> = HashMap::new();
    for (row, key) in column_f64(right, SEQN)?.into_iter().enumerate() {
        if let Some(key) = key {
            right_index.entry(key.to_bits()).or_default().push(row as IdxSize);
        }
    }

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    for (row, key) in column_f64(left, SEQN)?.into_iter().enumerate() {
        let Some(matches) = key.and_then(|key| right_index.get(&key.to_bits())) else {
            continue;
        };
        for &matched in matches {
            left_rows.push(row as IdxSize);
            right_rows.push(matched);
        }
    }

    let left_taken = left.take(&IdxCa::from_vec("left".into(), left_rows))?;
    let right_taken = right
        .drop(SEQN)?
        .take(&IdxCa::from_vec("right".into(), right_rows))?;

    let mut taken_names: Vec<String> = left_taken
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let mut renamed: Vec<Column> = Vec::with_capacity(right_taken.width());
    for column in right_taken.get_columns() {
        let mut name = column.name().to_string();
        while taken_names.contains(&name) {
            name.push_str(suffix);
        }
        if name != column.name().as_str() {
            debug!(column = %column.name(), renamed = %name, "resolved column collision");
        }
        taken_names.push(name.clone());
        renamed.push(column.clone().with_name(name.into()));
    }

    Ok(left_taken.hstack(&renamed)?)
}

/// Join the topic tables in the fixed order demographics, sleep, alcohol,
/// smoking, then the optional depression table.
pub fn merge(
    demographics: &DataFrame,
    sleep: &DataFrame,
    alcohol: &DataFrame,
    smoking: &DataFrame,
    depression: Option<&DataFrame>,
) -> Result<DataFrame> {
    let joins = [
        (SurveyTopic::Sleep, Some(sleep)),
        (SurveyTopic::Alcohol, Some(alcohol)),
        (SurveyTopic::Smoking, Some(smoking)),
        (SurveyTopic::Depression, depression),
    ];

    let mut merged = demographics.clone();
    for (topic, table) in joins {
        let Some(table) = table else {
            continue;
        };
        merged = inner_join(&merged, table, topic.join_suffix())?;
        debug!(topic = %topic, rows = merged.height(), columns = merged.width(), "joined table");
    }
    Ok(merged)
}

/// [`merge`] over loaded survey tables.
pub fn merge_survey_tables(tables: &SurveyTables) -> Result<DataFrame> {
    merge(
        &tables.demographics.data,
        &tables.sleep.data,
        &tables.alcohol.data,
        &tables.smoking.data,
        tables.depression.as_ref().map(|table| &table.data),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn table(keys: &[f64], column: &str, values: &[f64]) -> DataFrame {
        DataFrame::new(vec![
            Series::new(SEQN.into(), keys.to_vec()).into(),
            Series::new(column.into(), values.to_vec()).into(),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_left_order_and_only_matching_keys() {
        let left = table(&[3.0, 1.0, 2.0], "A", &[30.0, 10.0, 20.0]);
        let right = table(&[1.0, 3.0, 4.0], "B", &[100.0, 300.0, 400.0]);

        let joined = inner_join(&left, &right, "_r").unwrap();
        assert_eq!(column_f64(&joined, SEQN).unwrap(), vec![Some(3.0), Some(1.0)]);
        assert_eq!(column_f64(&joined, "B").unwrap(), vec![Some(300.0), Some(100.0)]);
    }

    #[test]
    fn collisions_suffix_the_right_column() {
        let left = table(&[1.0], "X", &[1.0]);
        let right = table(&[1.0], "X", &[2.0]);

        let joined = inner_join(&left, &right, "_slq").unwrap();
        assert_eq!(column_f64(&joined, "X").unwrap(), vec![Some(1.0)]);
        assert_eq!(column_f64(&joined, "X_slq").unwrap(), vec![Some(2.0)]);
        assert_eq!(joined.width(), 3);
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let left = table(&[1.0], "X", &[1.0]);
        let right = left.clone();

        let err = inner_join(&left, &right, SurveyTopic::Demographics.join_suffix()).unwrap_err();
        assert!(matches!(err, TransformError::EmptySuffix { stage: "merge" }));
    }

    #[test]
    fn missing_keys_never_match() {
        let left = DataFrame::new(vec![
            Series::new(SEQN.into(), vec![None, Some(1.0)]).into(),
        ])
        .unwrap();
        let right = DataFrame::new(vec![
            Series::new(SEQN.into(), vec![None, Some(1.0)]).into(),
        ])
        .unwrap();

        let joined = inner_join(&left, &right, "_r").unwrap();
        assert_eq!(joined.height(), 1);
    }

    #[test]
    fn missing_key_column_is_a_schema_error() {
        let left = table(&[1.0], "A", &[1.0]);
        let right = DataFrame::new(vec![Series::new("B".into(), vec![1.0]).into()]).unwrap();
        assert!(inner_join(&left, &right, "_r").is_err());
    }
}
