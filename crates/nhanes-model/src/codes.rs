//! Categorical codes for raw answers and derived status variables.
//!
//! Raw NHANES answers are numeric codes from closed per-question code sets
//! (for example `1 = Yes, 2 = No`). Derived status variables are written back
//! as numeric codes too, so downstream models can consume them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic yes/no answer codes shared by most screener questions.
pub const ANSWER_YES: f64 = 1.0;
pub const ANSWER_NO: f64 = 2.0;

/// `SMQ040` answer codes.
pub const SMOKES_EVERY_DAY: f64 = 1.0;
pub const SMOKES_SOME_DAYS: f64 = 2.0;
pub const SMOKES_NOT_AT_ALL: f64 = 3.0;

/// Derived cigarette smoking status (`SMOKING_STATUS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    Current,
    Former,
    Never,
}

impl SmokingStatus {
    /// Numeric code written to the prepared dataset.
    pub fn code(self) -> f64 {
        match self {
            Self::Current => 1.0,
            Self::Former => 2.0,
            Self::Never => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Former => "Former",
            Self::Never => "Never",
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived drinking status (`ALCOHOL_STATUS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlcoholStatus {
    Never,
    Light,
    Moderate,
    Heavy,
}

impl AlcoholStatus {
    /// Upper bound (inclusive) of average drinks per day for the light band.
    pub const LIGHT_MAX: f64 = 2.0;
    /// Upper bound (inclusive) of average drinks per day for the moderate band.
    pub const MODERATE_MAX: f64 = 4.0;

    pub fn code(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Light => 1.0,
            Self::Moderate => 2.0,
            Self::Heavy => 3.0,
        }
    }

    /// Band a positive average-drinks-per-day value.
    ///
    /// `(0, 2]` is light, `(2, 4]` moderate, above 4 heavy. Zero, negative
    /// and non-finite values have no band.
    pub fn band(avg_drinks: f64) -> Option<Self> {
        if !avg_drinks.is_finite() || avg_drinks <= 0.0 {
            None
        } else if avg_drinks <= Self::LIGHT_MAX {
            Some(Self::Light)
        } else if avg_drinks <= Self::MODERATE_MAX {
            Some(Self::Moderate)
        } else {
            Some(Self::Heavy)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for AlcoholStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bins for `AGE_GROUP`: right-closed intervals over (0, 80].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [Self::Young, Self::Adult, Self::MiddleAged, Self::Senior];

    /// Upper bound (inclusive) of the bin, in years.
    pub fn upper_bound(self) -> f64 {
        match self {
            Self::Young => 29.0,
            Self::Adult => 44.0,
            Self::MiddleAged => 59.0,
            Self::Senior => 80.0,
        }
    }

    /// Bin an age in years. Ages at or below 0 or above 80 have no bin.
    pub fn from_age(age: f64) -> Option<Self> {
        if !age.is_finite() || age <= 0.0 {
            return None;
        }
        Self::ALL.into_iter().find(|group| age <= group.upper_bound())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Young => "18-29",
            Self::Adult => "30-44",
            Self::MiddleAged => "45-59",
            Self::Senior => "60+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How boolean indicators treat a missing input.
///
/// `Coerce` reproduces the historical behaviour: a comparison against a
/// missing value counts as false, so an indicator is never missing. This can
/// classify a respondent with unknown sleep status as a good sleeper.
/// `ThreeValued` keeps indicators missing when their input is missing and
/// combines `POOR_SLEEP` with a Kleene OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorPolicy {
    #[default]
    Coerce,
    ThreeValued,
}

impl IndicatorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coerce => "coerce",
            Self::ThreeValued => "three-valued",
        }
    }
}

impl fmt::Display for IndicatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alcohol_band_boundaries() {
        assert_eq!(AlcoholStatus::band(0.0), None);
        assert_eq!(AlcoholStatus::band(-1.0), None);
        assert_eq!(AlcoholStatus::band(0.5), Some(AlcoholStatus::Light));
        assert_eq!(AlcoholStatus::band(2.0), Some(AlcoholStatus::Light));
        assert_eq!(AlcoholStatus::band(2.01), Some(AlcoholStatus::Moderate));
        assert_eq!(AlcoholStatus::band(4.0), Some(AlcoholStatus::Moderate));
        assert_eq!(AlcoholStatus::band(4.01), Some(AlcoholStatus::Heavy));
        assert_eq!(AlcoholStatus::band(f64::NAN), None);
    }

    #[test]
    fn age_group_bins_are_right_closed() {
        assert_eq!(AgeGroup::from_age(0.0), None);
        assert_eq!(AgeGroup::from_age(18.0), Some(AgeGroup::Young));
        assert_eq!(AgeGroup::from_age(29.0), Some(AgeGroup::Young));
        assert_eq!(AgeGroup::from_age(29.5), Some(AgeGroup::Adult));
        assert_eq!(AgeGroup::from_age(44.0), Some(AgeGroup::Adult));
        assert_eq!(AgeGroup::from_age(59.0), Some(AgeGroup::MiddleAged));
        assert_eq!(AgeGroup::from_age(80.0), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::from_age(81.0), None);
    }
}
