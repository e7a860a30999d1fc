//! Survey topics and their source files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five NHANES 2017-2018 questionnaire components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyTopic {
    Demographics,
    Sleep,
    Alcohol,
    Smoking,
    Depression,
}

impl SurveyTopic {
    /// All topics in merge order. Demographics is always the left-most table.
    pub const ALL: [SurveyTopic; 5] = [
        Self::Demographics,
        Self::Sleep,
        Self::Alcohol,
        Self::Smoking,
        Self::Depression,
    ];

    /// File stem of the source extract (without extension).
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Demographics => "DEMO_J",
            Self::Sleep => "SLQ_J",
            Self::Alcohol => "ALQ_J",
            Self::Smoking => "SMQ_J",
            Self::Depression => "DPQ_J",
        }
    }

    /// Short tag used in logs and reports.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Demographics => "demo",
            Self::Sleep => "slq",
            Self::Alcohol => "alq",
            Self::Smoking => "smq",
            Self::Depression => "dpq",
        }
    }

    /// Suffix appended to this topic's columns when their names collide
    /// with a column already present in the merged table.
    ///
    /// Demographic columns are never suffixed.
    pub fn join_suffix(self) -> &'static str {
        match self {
            Self::Demographics => "",
            Self::Sleep => "_slq",
            Self::Alcohol => "_alq",
            Self::Smoking => "_smq",
            Self::Depression => "_dpq",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Demographics => "Demographic Variables and Sample Weights",
            Self::Sleep => "Sleep Disorders",
            Self::Alcohol => "Alcohol Use",
            Self::Smoking => "Smoking - Cigarette Use",
            Self::Depression => "Mental Health - Depression Screener",
        }
    }
}

impl fmt::Display for SurveyTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
