//! Column contract of the downstream analysis components.
//!
//! The clustering, regression and decision-tree components each load the
//! prepared dataset on their own and drop rows missing any of their required
//! columns. The preparation pipeline only guarantees those columns exist.

use serde::Serialize;

use crate::variables::{
    ALCOHOL_STATUS, AVG_DRINKS_DAY, CIGARETTES_PER_DAY, INDFMPIR, POOR_SLEEP, RIAGENDR, RIDAGEYR,
    SEQN, SLD012, SLQ030, SLQ120, SMOKING_STATUS,
};

/// Subdirectories of the results tree written by the consumers.
pub const RESULT_SUBDIRS: [&str; 3] = ["figures", "tables", "models"];

/// A model family that consumes the prepared dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisConsumer {
    Clustering,
    Regression,
    DecisionTree,
}

impl AnalysisConsumer {
    pub const ALL: [AnalysisConsumer; 3] = [Self::Clustering, Self::Regression, Self::DecisionTree];

    pub fn name(self) -> &'static str {
        match self {
            Self::Clustering => "clustering",
            Self::Regression => "regression",
            Self::DecisionTree => "decision_tree",
        }
    }

    /// Columns that must be present and non-missing for a row to be used.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Clustering => &[
                SMOKING_STATUS,
                ALCOHOL_STATUS,
                RIDAGEYR,
                RIAGENDR,
                INDFMPIR,
                CIGARETTES_PER_DAY,
                AVG_DRINKS_DAY,
                SEQN,
            ],
            Self::Regression => &[
                SMOKING_STATUS,
                ALCOHOL_STATUS,
                CIGARETTES_PER_DAY,
                AVG_DRINKS_DAY,
                RIDAGEYR,
                RIAGENDR,
                INDFMPIR,
                SLD012,
                SLQ030,
                SLQ120,
            ],
            Self::DecisionTree => &[
                SMOKING_STATUS,
                ALCOHOL_STATUS,
                CIGARETTES_PER_DAY,
                AVG_DRINKS_DAY,
                RIDAGEYR,
                RIAGENDR,
                INDFMPIR,
                POOR_SLEEP,
            ],
        }
    }
}
