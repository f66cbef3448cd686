//! Paged query types shared by the API client and the loaders.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Name filter accepted by the query API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NameFilter {
    /// Filter for a search term; blank terms mean "no filter"
    pub fn from_term(term: &str) -> Option<Self> {
        let term = term.trim();
        (!term.is_empty()).then(|| Self {
            name: Some(term.to_string()),
        })
    }
}

/// Sort direction of a sort specification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One sort key: a column field and a direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{dir}", self.field)
    }
}

/// Parses `field`, `field:asc` or `field:desc`
impl FromStr for SortSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = s.split_once(':').unwrap_or((s, "asc"));
        let field = field.trim();
        if field.is_empty() {
            return Err(Error::Invalid {
                message: format!("Empty sort field in '{s}'"),
            });
        }
        let direction = match dir.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(Error::Invalid {
                    message: format!("Unknown sort direction '{other}'"),
                });
            }
        };
        Ok(Self::new(field, direction))
    }
}

/// One call to the paged query API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub filter: Option<NameFilter>,
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(page: u32) -> Self {
        Self {
            page,
            filter: None,
            sort: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<NameFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }
}

/// Page metadata as reported by the query API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total records matching the query, across all pages
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Whether `page` is the last page for `total_count` records
pub fn reaches_end(page: u32, page_size: usize, total_count: usize) -> bool {
    (page as usize).saturating_mul(page_size) >= total_count
}

/// Column filters set on a grid, keyed by column field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterModel {
    filters: AHashMap<String, String>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with a single `name` filter; blank terms give an empty model
    pub fn name(term: &str) -> Self {
        let mut model = Self::new();
        model.set("name", term);
        model
    }

    /// Set a column filter; a blank value clears it
    pub fn set(&mut self, field: impl Into<String>, value: &str) {
        let field = field.into();
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Reduce to the filter variables the query API understands
    pub fn to_name_filter(&self) -> Option<NameFilter> {
        self.get("name").and_then(NameFilter::from_term)
    }
}
