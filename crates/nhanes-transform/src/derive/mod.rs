//! Derived analysis variables.
//!
//! Each sub-transform reads raw survey codes from one topic table and appends
//! new columns; raw columns are never removed. All inputs must already be
//! sentinel-cleaned, otherwise a refusal code is read as a real answer.
//!
//! Boolean indicators are written as `1.0` / `0.0`. How a missing input
//! affects an indicator is controlled by [`IndicatorPolicy`].

mod alcohol;
mod demographic;
mod sleep;
mod smoking;

use std::fmt;

use polars::prelude::{DataFrame, NamedFrom, Series};

use nhanes_model::{IndicatorPolicy, SurveyTopic};
use nhanes_model::variables::{
    AGE_GROUP, ALCOHOL_STATUS, ALQ111, ALQ130, ALQ151, AVG_DRINKS_DAY, AVG_SLEEP, BINGE_DRINKER,
    CIGARETTES_PER_DAY, CURRENT_SMOKER, GENDER, HEAVY_DRINKER, HIGH_SLEEPINESS, INDFMPIR,
    LOW_INCOME, LOW_SLEEP_HOURS, POOR_SLEEP, POOR_SLEEP_DIAGNOSIS, RIAGENDR, RIDAGEYR, SLD012,
    SLD013, SLEEP_DIFF, SLQ050, SLQ120, SMD641, SMOKING_STATUS, SMQ020, SMQ040,
};

use crate::error::{Result, require_columns};

pub use alcohol::{alcohol_status, derive_alcohol};
pub use demographic::derive_demographic;
pub use sleep::derive_sleep;
pub use smoking::{SmokingAnswers, derive_smoking, smoking_status};

/// One of the four derivation sub-transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeriveStage {
    Sleep,
    Smoking,
    Alcohol,
    Demographic,
}

impl DeriveStage {
    pub const ALL: [DeriveStage; 4] = [
        Self::Sleep,
        Self::Smoking,
        Self::Alcohol,
        Self::Demographic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep derivation",
            Self::Smoking => "smoking derivation",
            Self::Alcohol => "alcohol derivation",
            Self::Demographic => "demographic derivation",
        }
    }

    /// Raw columns the stage reads.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Sleep => &[SLD012, SLD013, SLQ050, SLQ120],
            Self::Smoking => &[SMQ020, SMQ040, SMD641],
            Self::Alcohol => &[ALQ111, ALQ130, ALQ151],
            Self::Demographic => &[RIDAGEYR, INDFMPIR, RIAGENDR],
        }
    }

    /// Columns the stage appends, in order.
    pub fn output_columns(self) -> &'static [&'static str] {
        match self {
            Self::Sleep => &[
                SLEEP_DIFF,
                AVG_SLEEP,
                POOR_SLEEP_DIAGNOSIS,
                LOW_SLEEP_HOURS,
                HIGH_SLEEPINESS,
                POOR_SLEEP,
            ],
            Self::Smoking => &[SMOKING_STATUS, CURRENT_SMOKER, CIGARETTES_PER_DAY],
            Self::Alcohol => &[ALCOHOL_STATUS, AVG_DRINKS_DAY, HEAVY_DRINKER, BINGE_DRINKER],
            Self::Demographic => &[AGE_GROUP, LOW_INCOME, GENDER],
        }
    }

    /// The stage that derives from `topic`'s table. The depression screener has none.
    pub fn for_topic(topic: SurveyTopic) -> Option<Self> {
        match topic {
            SurveyTopic::Demographics => Some(Self::Demographic),
            SurveyTopic::Sleep => Some(Self::Sleep),
            SurveyTopic::Alcohol => Some(Self::Alcohol),
            SurveyTopic::Smoking => Some(Self::Smoking),
            SurveyTopic::Depression => None,
        }
    }

    pub fn apply(self, df: &DataFrame, policy: IndicatorPolicy) -> Result<DataFrame> {
        match self {
            Self::Sleep => derive_sleep(df, policy),
            Self::Smoking => derive_smoking(df, policy),
            Self::Alcohol => derive_alcohol(df, policy),
            Self::Demographic => derive_demographic(df, policy),
        }
    }

    pub(crate) fn check_inputs(self, df: &DataFrame) -> Result<()> {
        require_columns(df, self.as_str(), self.required_columns())
    }
}

impl fmt::Display for DeriveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Evaluate a boolean indicator over a possibly-missing input.
pub(crate) fn indicator(
    value: Option<f64>,
    test: impl Fn(f64) -> bool,
    policy: IndicatorPolicy,
) -> Option<f64> {
    match (value, policy) {
        (Some(v), _) => Some(flag(test(v))),
        (None, IndicatorPolicy::Coerce) => Some(0.0),
        (None, IndicatorPolicy::ThreeValued) => None,
    }
}

/// Logical OR over indicator values.
///
/// Under `Coerce` a missing flag counts as false. Under `ThreeValued` this is
/// the Kleene OR: true if any flag is true, false only if all are false,
/// otherwise missing.
pub(crate) fn any_of(flags: &[Option<f64>], policy: IndicatorPolicy) -> Option<f64> {
    if flags.contains(&Some(1.0)) {
        return Some(1.0);
    }
    match policy {
        IndicatorPolicy::Coerce => Some(0.0),
        IndicatorPolicy::ThreeValued => flags.iter().all(Option::is_some).then_some(0.0),
    }
}

pub(crate) fn put_f64(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_policies() {
        let over_two = |v: f64| v > 2.0;
        assert_eq!(indicator(Some(3.0), over_two, IndicatorPolicy::Coerce), Some(1.0));
        assert_eq!(indicator(Some(1.0), over_two, IndicatorPolicy::ThreeValued), Some(0.0));
        assert_eq!(indicator(None, over_two, IndicatorPolicy::Coerce), Some(0.0));
        assert_eq!(indicator(None, over_two, IndicatorPolicy::ThreeValued), None);
    }

    #[test]
    fn kleene_or() {
        use IndicatorPolicy::{Coerce, ThreeValued};
        assert_eq!(any_of(&[None, Some(1.0), Some(0.0)], ThreeValued), Some(1.0));
        assert_eq!(any_of(&[Some(0.0), Some(0.0), Some(0.0)], ThreeValued), Some(0.0));
        assert_eq!(any_of(&[Some(0.0), None, Some(0.0)], ThreeValued), None);
        assert_eq!(any_of(&[None, None, None], ThreeValued), None);
        assert_eq!(any_of(&[None, None, None], Coerce), Some(0.0));
    }

    #[test]
    fn every_topic_but_depression_has_a_stage() {
        let stages: Vec<DeriveStage> = SurveyTopic::ALL
            .into_iter()
            .filter_map(DeriveStage::for_topic)
            .collect();
        assert_eq!(stages.len(), DeriveStage::ALL.len());
        assert_eq!(DeriveStage::for_topic(SurveyTopic::Depression), None);
    }

    #[test]
    fn stages_do_not_share_output_columns() {
        let mut seen = std::collections::HashSet::new();
        for stage in DeriveStage::ALL {
            for column in stage.output_columns() {
                assert!(seen.insert(*column), "{column} produced twice");
            }
        }
    }
}
