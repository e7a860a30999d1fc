//! NHANES survey data model.
//!
//! Shared vocabulary for the preparation pipeline: survey topics and their
//! source files, raw and derived variable codes, the sentinel code set,
//! categorical status codes, the analysis schema, and the column contract of
//! the downstream analysis consumers.

pub mod codes;
pub mod consumer;
pub mod schema;
pub mod sentinel;
pub mod topic;
pub mod variables;

pub use codes::{AgeGroup, AlcoholStatus, IndicatorPolicy, SmokingStatus};
pub use consumer::{AnalysisConsumer, RESULT_SUBDIRS};
pub use schema::{
    ANALYSIS_SCHEMA_VERSION, ANALYSIS_VARIABLES, AnalysisVariable, KEY_SUMMARY_VARIABLES,
    VariableGroup, analysis_variable_names,
};
pub use sentinel::{SENTINEL_CODES, is_sentinel};
pub use topic::SurveyTopic;
