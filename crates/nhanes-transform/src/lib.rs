//! Transformations that turn raw NHANES tables into the analysis dataset.
//!
//! - **sentinel**: recode refused / don't-know codes to missing
//! - **derive**: sleep, smoking, alcohol and demographic variables
//! - **merge**: inner joins on `SEQN` with per-topic collision suffixes
//! - **select**: projection onto the analysis schema
//! - **missing**: listwise deletion and sparse-column dropping
//! - **summary**, **correlation**, **consumers**: post-preparation reporting

pub mod consumers;
pub mod correlation;
pub mod derive;
pub mod error;
pub mod merge;
pub mod missing;
pub mod select;
pub mod sentinel;
pub mod summary;

pub use consumers::{ConsumerReadiness, check_consumers, complete_cases};
pub use correlation::{CorrelationMatrix, pearson, pearson_matrix};
pub use derive::{DeriveStage, derive_alcohol, derive_demographic, derive_sleep, derive_smoking};
pub use error::{Result, SchemaError, TransformError};
pub use merge::{inner_join, merge, merge_survey_tables};
pub use missing::{DEFAULT_MISSING_THRESHOLD, drop_high_missing, listwise_delete};
pub use select::{absent_analysis_variables, select_analysis_variables};
pub use sentinel::{CleanReport, clean, clean_with_report};
pub use summary::{
    ColumnStatistics, DatasetSummary, MissingShare, TOP_MISSING, describe, missing_shares,
    summarize,
};
