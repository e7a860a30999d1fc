//! NHANES survey table ingestion.
//!
//! Locates the five per-topic raw files of a survey cycle, reads them into
//! polars DataFrames and checks the respondent key.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use nhanes_ingest::load_survey_tables;
//!
//! let tables = load_survey_tables(Path::new("data/raw"), true)?;
//! println!("{} respondents in DEMO_J", tables.demographics.row_count());
//! ```

mod csv;
mod error;
mod frame;
mod loader;
pub mod polars;

// === Error Types ===
pub use error::{DataSourceError, Result};

// === Tables ===
pub use frame::{SourceFormat, SurveyTable, SurveyTables};

// === Loading ===
pub use csv::read_raw_csv;
pub use loader::{SourceStatus, load_survey_tables, load_topic, locate_source, source_status};
