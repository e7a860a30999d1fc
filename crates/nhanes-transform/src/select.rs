//! Projection onto the analysis schema.

use polars::prelude::DataFrame;

use nhanes_model::analysis_variable_names;

use crate::error::Result;

/// Analysis variables the table does not have, in schema order.
pub fn absent_analysis_variables(df: &DataFrame) -> Vec<&'static str> {
    analysis_variable_names()
        .filter(|name| df.column(name).is_err())
        .collect()
}

/// Keep only the analysis variables, in schema order.
///
/// Absent variables are left out without error so that older or partial
/// extracts still produce a dataset.
pub fn select_analysis_variables(df: &DataFrame) -> Result<DataFrame> {
    let present: Vec<&str> = analysis_variable_names()
        .filter(|name| df.column(name).is_ok())
        .collect();
    Ok(df.select(present)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhanes_model::ANALYSIS_VARIABLES;
    use nhanes_model::variables::{POOR_SLEEP, SEQN, SLD012};
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn drops_extras_and_skips_absent_names() {
        let df = DataFrame::new(vec![
            Series::new(SLD012.into(), vec![7.0]).into(),
            Series::new("DPQ010".into(), vec![0.0]).into(),
            Series::new(SEQN.into(), vec![1.0]).into(),
        ])
        .unwrap();

        let selected = select_analysis_variables(&df).unwrap();
        let names: Vec<String> = selected
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec![SEQN, SLD012]);

        let absent = absent_analysis_variables(&df);
        assert_eq!(absent.len(), ANALYSIS_VARIABLES.len() - 2);
        assert!(absent.contains(&POOR_SLEEP));
    }
}
