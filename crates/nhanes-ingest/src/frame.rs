//! Survey table types.

use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::Serialize;

use nhanes_model::SurveyTopic;

/// On-disk format a table was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Xpt,
    Csv,
}

impl SourceFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xpt => "xpt",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One per-topic survey table with its provenance.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    pub topic: SurveyTopic,
    pub source: PathBuf,
    pub format: SourceFormat,
    pub data: DataFrame,
}

impl SurveyTable {
    pub fn new(topic: SurveyTopic, source: &Path, format: SourceFormat, data: DataFrame) -> Self {
        Self {
            topic,
            source: source.to_path_buf(),
            format,
            data,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// Replace the table contents, keeping provenance.
    pub fn with_data(self, data: DataFrame) -> Self {
        Self { data, ..self }
    }
}

/// The raw tables of one survey cycle.
#[derive(Debug, Clone)]
pub struct SurveyTables {
    pub demographics: SurveyTable,
    pub sleep: SurveyTable,
    pub alcohol: SurveyTable,
    pub smoking: SurveyTable,
    /// Absent when the depression screener is not joined.
    pub depression: Option<SurveyTable>,
}

impl SurveyTables {
    /// Tables in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &SurveyTable> {
        [
            Some(&self.demographics),
            Some(&self.sleep),
            Some(&self.alcohol),
            Some(&self.smoking),
            self.depression.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn get(&self, topic: SurveyTopic) -> Option<&SurveyTable> {
        self.iter().find(|table| table.topic == topic)
    }

    /// Apply `f` to every table, stopping at the first error.
    pub fn try_map<E>(
        self,
        mut f: impl FnMut(SurveyTable) -> Result<SurveyTable, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            demographics: f(self.demographics)?,
            sleep: f(self.sleep)?,
            alcohol: f(self.alcohol)?,
            smoking: f(self.smoking)?,
            depression: self.depression.map(&mut f).transpose()?,
        })
    }
}
