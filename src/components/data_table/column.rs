//! Column Definition
//!
//! Defines table columns with their properties and value getters.

use std::sync::Arc;

use crate::domain::{CellValue, Record};

type ValueGetter<R> = Arc<dyn Fn(&R) -> Option<CellValue> + Send + Sync>;

/// Column definition for the DataTable
pub struct Column<R> {
    /// Column identifier (the record field it reads)
    pub id: &'static str,
    /// Column header label
    pub label: &'static str,
    /// Column width in characters
    pub width: ColumnWidth,
    /// Whether the column is sortable
    pub sortable: bool,
    /// Whether the column takes part in filtering
    pub filterable: bool,
    value: ValueGetter<R>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label,
            width: self.width,
            sortable: self.sortable,
            filterable: self.filterable,
            value: self.value.clone(),
        }
    }
}

/// Column width specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width
    Fixed(usize),
    /// Flexible width with optional min/max
    Flex { min: Option<usize>, max: Option<usize> },
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex { min: None, max: None }
    }
}

impl ColumnWidth {
    /// Resolve against the widest cell content
    pub fn resolve(self, content: usize) -> usize {
        match self {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Flex { min, max } => {
                let w = content.max(min.unwrap_or(0));
                max.map_or(w, |max| w.min(max))
            }
        }
    }
}

impl<R: Record> Column<R> {
    /// Create a column reading the record field `id`
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            width: ColumnWidth::default(),
            sortable: false,
            filterable: false,
            value: Arc::new(move |row: &R| row.field(id)),
        }
    }

    /// Replace the value getter (computed columns)
    pub fn value_getter(mut self, getter: impl Fn(&R) -> Option<CellValue> + Send + Sync + 'static) -> Self {
        self.value = Arc::new(getter);
        self
    }

    /// Set fixed width
    pub fn fixed_width(mut self, width: usize) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set flexible width with optional constraints
    pub fn flex_width(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.width = ColumnWidth::Flex { min, max };
        self
    }

    /// Make the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Cell value for a row
    pub fn value(&self, row: &R) -> Option<CellValue> {
        (self.value)(row)
    }

    /// Cell text for a row, empty when there is no value
    pub fn display(&self, row: &R) -> String {
        self.value(row).map(|v| v.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::sample_characters;

    #[test]
    fn test_value_reads_record_field() {
        let rows = sample_characters(3);
        let column = Column::new("episodeCount", "Episodes").sortable();

        assert_eq!(column.value(&rows[2]), Some(CellValue::Number(4)));
        assert!(column.sortable);
    }

    #[test]
    fn test_value_getter_override() {
        let rows = sample_characters(1);
        let column = Column::new("shout", "Shout")
            .value_getter(|c: &crate::domain::Character| Some(CellValue::text(c.name.to_uppercase())));

        assert_eq!(column.display(&rows[0]), "CHARACTER 1");
    }

    #[test]
    fn test_width_resolve() {
        assert_eq!(ColumnWidth::Fixed(6).resolve(20), 6);
        assert_eq!(ColumnWidth::Flex { min: Some(10), max: None }.resolve(4), 10);
        assert_eq!(ColumnWidth::Flex { min: None, max: Some(12) }.resolve(30), 12);
    }
}
