//! Library side of the `nhanes-prep` binary: configuration, logging,
//! pipeline stages and the persisted outputs.

pub mod config;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;
