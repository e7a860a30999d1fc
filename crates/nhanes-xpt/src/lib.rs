//! SAS Transport (XPT) version 5 reader.
//!
//! NHANES distributes every public-use table as a single-member XPT file.
//! This crate reads those files into an in-memory [`XptDataset`] and, with the
//! `polars` feature, into a polars `DataFrame`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use nhanes_xpt::read_xpt;
//!
//! let dataset = read_xpt(Path::new("data/raw/DEMO_J.xpt"))?;
//! println!("{} rows, {} columns", dataset.num_rows(), dataset.num_columns());
//! # Ok::<(), nhanes_xpt::XptError>(())
//! ```

pub mod error;
pub mod float;
pub mod header;
pub mod reader;
pub mod types;

#[cfg(feature = "polars")]
pub mod polars_ext;

pub use error::{Result, XptError};
pub use float::{MissingValue, ibm_to_ieee, ieee_to_ibm, missing_code};
pub use reader::{XptReader, read_xpt, read_xpt_with_options};
pub use types::{XptColumn, XptDataset, XptReaderOptions, XptType, XptValue};

#[cfg(feature = "polars")]
pub use polars_ext::dataset_to_dataframe;
