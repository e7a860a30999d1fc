//! Demographic variables from the DEMO table.

use polars::prelude::{DataFrame, NamedFrom, Series};

use nhanes_ingest::polars::column_f64;
use nhanes_model::variables::{
    AGE_GROUP, GENDER, INDFMPIR, LOW_INCOME, LOW_INCOME_RATIO, RIAGENDR, RIDAGEYR,
};
use nhanes_model::{AgeGroup, IndicatorPolicy};

use super::{DeriveStage, indicator, put_f64};
use crate::error::Result;

/// Append `AGE_GROUP` (text labels), `LOW_INCOME` and `GENDER`.
pub fn derive_demographic(df: &DataFrame, policy: IndicatorPolicy) -> Result<DataFrame> {
    DeriveStage::Demographic.check_inputs(df)?;

    let age = column_f64(df, RIDAGEYR)?;
    let income_ratio = column_f64(df, INDFMPIR)?;

    let age_groups: Vec<Option<&str>> = age
        .iter()
        .map(|age| age.and_then(AgeGroup::from_age).map(AgeGroup::label))
        .collect();
    let low_income = income_ratio
        .iter()
        .map(|ratio| indicator(*ratio, |v| v < LOW_INCOME_RATIO, policy))
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(AGE_GROUP.into(), age_groups))?;
    put_f64(&mut out, LOW_INCOME, low_income)?;
    // Passthrough with no recoding.
    let gender = df.column(RIAGENDR)?.clone().with_name(GENDER.into());
    out.with_column(gender)?;
    Ok(out)
}
