//! Record - Grid Row Abstraction
//!
//! Rows shown in a grid expose their cells by column field name, including
//! nested (`origin.name`) and derived (`episodeCount`) fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(i64),
    Text(String),
    /// Calendar date shown in the API's long form, e.g. `December 2, 2013`
    Date(NaiveDate),
}

/// Date format used by the API for air dates
pub const LONG_DATE_FORMAT: &str = "%B %d, %Y";

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn count(len: usize) -> Self {
        CellValue::Number(i64::try_from(len).unwrap_or(i64::MAX))
    }

    /// A long-form date, kept as text when it does not parse
    pub fn long_date(value: &str) -> Self {
        NaiveDate::parse_from_str(value.trim(), LONG_DATE_FORMAT)
            .map_or_else(|_| CellValue::text(value), CellValue::Date)
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Date(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%B %-d, %Y")),
        }
    }
}

/// Row type consumed by the grids and the loaders
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identifier of the record
    fn id(&self) -> &str;

    /// Value of a column field, `None` when the field is unknown or empty
    fn field(&self, name: &str) -> Option<CellValue>;
}
