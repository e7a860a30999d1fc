//! The fixed analysis schema projected out of the merged survey table.

use serde::Serialize;

use crate::variables::{
    AGE_GROUP, ALCOHOL_STATUS, ALQ111, ALQ130, ALQ151, AVG_DRINKS_DAY, AVG_SLEEP, BINGE_DRINKER,
    CIGARETTES_PER_DAY, CURRENT_SMOKER, DMDEDUC2, DMDHHSIZ, GENDER, HEAVY_DRINKER,
    HIGH_SLEEPINESS, INDFMPIR, LOW_INCOME, LOW_SLEEP_HOURS, POOR_SLEEP, POOR_SLEEP_DIAGNOSIS,
    RIAGENDR, RIDAGEYR, RIDRETH1, SEQN, SLD012, SLD013, SLEEP_DIFF, SLQ030, SLQ050, SLQ120,
    SMD641, SMOKING_STATUS, SMQ020, SMQ040,
};

/// Bumped whenever [`ANALYSIS_VARIABLES`] changes.
pub const ANALYSIS_SCHEMA_VERSION: u32 = 1;

/// Role of a column in the analysis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableGroup {
    Identifier,
    SleepOutcome,
    SmokingPredictor,
    AlcoholPredictor,
    DemographicControl,
}

impl VariableGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "Identifiers",
            Self::SleepOutcome => "Sleep outcomes",
            Self::SmokingPredictor => "Smoking predictors",
            Self::AlcoholPredictor => "Alcohol predictors",
            Self::DemographicControl => "Demographic controls",
        }
    }
}

/// A named column of the analysis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisVariable {
    pub name: &'static str,
    pub group: VariableGroup,
}

const fn var(name: &'static str, group: VariableGroup) -> AnalysisVariable {
    AnalysisVariable { name, group }
}

/// Columns of the prepared dataset, in output order.
pub const ANALYSIS_VARIABLES: [AnalysisVariable; 34] = [
    var(SEQN, VariableGroup::Identifier),
    var(SLD012, VariableGroup::SleepOutcome),
    var(SLD013, VariableGroup::SleepOutcome),
    var(SLQ030, VariableGroup::SleepOutcome),
    var(SLQ050, VariableGroup::SleepOutcome),
    var(SLQ120, VariableGroup::SleepOutcome),
    var(SLEEP_DIFF, VariableGroup::SleepOutcome),
    var(AVG_SLEEP, VariableGroup::SleepOutcome),
    var(POOR_SLEEP, VariableGroup::SleepOutcome),
    var(POOR_SLEEP_DIAGNOSIS, VariableGroup::SleepOutcome),
    var(LOW_SLEEP_HOURS, VariableGroup::SleepOutcome),
    var(HIGH_SLEEPINESS, VariableGroup::SleepOutcome),
    var(SMQ020, VariableGroup::SmokingPredictor),
    var(SMQ040, VariableGroup::SmokingPredictor),
    var(SMOKING_STATUS, VariableGroup::SmokingPredictor),
    var(CURRENT_SMOKER, VariableGroup::SmokingPredictor),
    var(CIGARETTES_PER_DAY, VariableGroup::SmokingPredictor),
    var(SMD641, VariableGroup::SmokingPredictor),
    var(ALQ111, VariableGroup::AlcoholPredictor),
    var(ALQ130, VariableGroup::AlcoholPredictor),
    var(ALCOHOL_STATUS, VariableGroup::AlcoholPredictor),
    var(AVG_DRINKS_DAY, VariableGroup::AlcoholPredictor),
    var(HEAVY_DRINKER, VariableGroup::AlcoholPredictor),
    var(BINGE_DRINKER, VariableGroup::AlcoholPredictor),
    var(ALQ151, VariableGroup::AlcoholPredictor),
    var(RIAGENDR, VariableGroup::DemographicControl),
    var(RIDAGEYR, VariableGroup::DemographicControl),
    var(RIDRETH1, VariableGroup::DemographicControl),
    var(DMDEDUC2, VariableGroup::DemographicControl),
    var(INDFMPIR, VariableGroup::DemographicControl),
    var(DMDHHSIZ, VariableGroup::DemographicControl),
    var(AGE_GROUP, VariableGroup::DemographicControl),
    var(LOW_INCOME, VariableGroup::DemographicControl),
    var(GENDER, VariableGroup::DemographicControl),
];

/// Names of [`ANALYSIS_VARIABLES`] in output order.
pub fn analysis_variable_names() -> impl Iterator<Item = &'static str> {
    ANALYSIS_VARIABLES.iter().map(|variable| variable.name)
}

/// Variables described in the post-preparation summary.
pub const KEY_SUMMARY_VARIABLES: [&str; 13] = [
    SLD012,
    SLD013,
    SLQ030,
    SLQ120,
    POOR_SLEEP,
    SMOKING_STATUS,
    CURRENT_SMOKER,
    CIGARETTES_PER_DAY,
    ALCOHOL_STATUS,
    AVG_DRINKS_DAY,
    HEAVY_DRINKER,
    RIDAGEYR,
    RIAGENDR,
];
