//! In-memory representation of a transport member.

use chrono::NaiveDateTime;

/// Variable storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XptType {
    /// 2 to 8 byte IBM float.
    Num,
    /// Fixed-width, space-padded text.
    Char,
}

impl XptType {
    /// Map the NAMESTR `ntype` field (1 numeric, 2 character).
    pub fn from_ntype(ntype: i16) -> Option<Self> {
        match ntype {
            1 => Some(Self::Num),
            2 => Some(Self::Char),
            _ => None,
        }
    }
}

/// A variable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XptColumn {
    pub name: String,
    pub label: Option<String>,
    pub data_type: XptType,
    /// Width in the observation record, in bytes.
    pub length: usize,
    pub format: Option<String>,
}

/// A single cell. Numeric missing codes of every kind decode to `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum XptValue {
    Num(Option<f64>),
    Char(String),
}

impl XptValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(value) => *value,
            Self::Char(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Char(text) => Some(text),
            Self::Num(_) => None,
        }
    }
}

/// A parsed transport member.
#[derive(Debug, Clone)]
pub struct XptDataset {
    pub name: String,
    pub label: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub columns: Vec<XptColumn>,
    pub rows: Vec<Vec<XptValue>>,
    /// Count of numeric cells holding a special missing code (`.A`-`.Z`, `._`).
    pub special_missing: usize,
}

impl XptDataset {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Iterate the values of one column.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &XptValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

/// Reader options.
#[derive(Debug, Clone, Copy)]
pub struct XptReaderOptions {
    /// Trim trailing spaces from character values.
    pub trim_strings: bool,
}

impl Default for XptReaderOptions {
    fn default() -> Self {
        Self { trim_strings: true }
    }
}
