//! DataProvider Traits
//!
//! In-memory row access for the client-side grid.

use std::ops::Range;
use std::sync::Arc;

use super::column::Column;
use crate::domain::{Record, SortDirection, SortSpec};
use crate::error::{Error, Result};

/// Trait for providing data to the DataTable
pub trait DataProvider: Send + Sync + 'static {
    type Row: Clone + Send + Sync + 'static;

    /// Get the total number of rows
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index
    fn row(&self, index: usize) -> Option<Self::Row>;

    /// Get multiple rows in a range
    fn rows(&self, range: Range<usize>) -> Vec<Self::Row> {
        range.filter_map(|i| self.row(i)).collect()
    }
}

/// Client-side row model: every row in memory, quick filter and sort applied
/// locally.
pub struct ClientRowModel<R> {
    columns: Vec<Column<R>>,
    rows: Arc<Vec<R>>,
    quick_filter: String,
    sort: Option<SortSpec>,
    /// Indices into `rows` after filter and sort
    view: Vec<usize>,
}

impl<R: Record> ClientRowModel<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Arc::new(Vec::new()),
            quick_filter: String::new(),
            sort: None,
            view: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Replace all rows, keeping the current filter and sort
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = Arc::new(rows);
        self.refresh_view();
    }

    /// Number of rows before filtering
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn quick_filter(&self) -> &str {
        &self.quick_filter
    }

    /// Keep rows where every word of `text` appears in some filterable cell
    pub fn set_quick_filter(&mut self, text: &str) {
        self.quick_filter = text.trim().to_lowercase();
        self.refresh_view();
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Sort the view by a sortable column, or clear sorting with `None`
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        if let Some(spec) = &sort {
            let sortable = self
                .columns
                .iter()
                .any(|c| c.id == spec.field && c.sortable);
            if !sortable {
                return Err(Error::Invalid {
                    message: format!("Column '{}' is not sortable", spec.field),
                });
            }
        }
        self.sort = sort;
        self.refresh_view();
        Ok(())
    }

    fn matches(&self, row: &R, words: &[&str]) -> bool {
        let haystack = self
            .columns
            .iter()
            .filter(|c| c.filterable)
            .map(|c| c.display(row).to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");
        words.iter().all(|w| haystack.contains(w))
    }

    fn refresh_view(&mut self) {
        let words: Vec<&str> = self.quick_filter.split_whitespace().collect();
        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|&i| words.is_empty() || self.matches(&self.rows[i], &words))
            .collect();

        if let Some(spec) = &self.sort {
            if let Some(column) = self.columns.iter().find(|c| c.id == spec.field) {
                view.sort_by(|&a, &b| {
                    let ord = column.value(&self.rows[a]).cmp(&column.value(&self.rows[b]));
                    match spec.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
            }
        }
        self.view = view;
    }
}

impl<R: Record> DataProvider for ClientRowModel<R> {
    type Row = R;

    fn len(&self) -> usize {
        self.view.len()
    }

    fn row(&self, index: usize) -> Option<R> {
        self.view.get(index).and_then(|&i| self.rows.get(i)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Character;
    use crate::services::mock::sample_characters;

    fn model() -> ClientRowModel<Character> {
        let mut model = ClientRowModel::new(vec![
            Column::new("name", "Character Name").sortable().filterable(),
            Column::new("status", "Status").filterable(),
            Column::new("gender", "Gender").filterable(),
            Column::new("episodeCount", "Episodes").sortable(),
        ]);
        model.set_rows(sample_characters(30));
        model
    }

    #[test]
    fn test_unfiltered_view_keeps_order() {
        let model = model();
        assert_eq!(model.len(), 30);
        assert_eq!(model.row(0).map(|c| c.id), Some("1".to_string()));
    }

    #[test]
    fn test_quick_filter_matches_filterable_columns() {
        let mut model = model();
        model.set_quick_filter("dead");
        assert_eq!(model.len(), 10);

        model.set_quick_filter("character 1 DEAD");
        let ids: Vec<String> = model.rows(0..model.len()).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["12", "15", "18", "21"]);

        model.set_quick_filter("");
        assert_eq!(model.len(), 30);
    }

    #[test]
    fn test_quick_filter_skips_unfilterable_columns() {
        let mut model = model();
        model.set_quick_filter("7");
        let ids: Vec<String> = model.rows(0..model.len()).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["7", "17", "27"]);
    }

    #[test]
    fn test_sort_by_derived_column() {
        let mut model = model();
        model.set_sort(Some(SortSpec::desc("episodeCount"))).expect("sortable");

        let counts: Vec<usize> = model.rows(0..model.len()).iter().map(Character::episode_count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(counts[0], 7);
    }

    #[test]
    fn test_sort_rejects_unsortable_column() {
        let mut model = model();
        assert!(model.set_sort(Some(SortSpec::asc("status"))).is_err());
        assert!(model.sort().is_none());
    }

    #[test]
    fn test_filter_survives_new_rows() {
        let mut model = model();
        model.set_quick_filter("female");
        model.set_rows(sample_characters(45));
        assert_eq!(model.len(), 22);
        assert_eq!(model.total_rows(), 45);
    }
}
