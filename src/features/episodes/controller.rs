//! Episodes Controller
//!
//! One data source for the page's lifetime; it reads the filter and sort
//! models from each row request. Searching sets the `name` filter model.

use crossbeam_channel::Sender;
use std::ops::Range;
use std::sync::Arc;

use super::columns::episode_columns;
use crate::components::data_table::{Column, DataTable, InfiniteRowModel, InfiniteSettings};
use crate::domain::{Episode, FilterModel, SortSpec};
use crate::error::{Error, Result};
use crate::features::report_load_error;
use crate::loaders::PagedBlockSource;
use crate::services::PageSource;
use crate::states::UIEvent;

const LOAD_FAILED: &str = "Could not load episodes";

/// Episodes page controller
pub struct EpisodesController {
    columns: Vec<Column<Episode>>,
    model: Arc<InfiniteRowModel<Episode>>,
    events: Sender<UIEvent>,
}

impl EpisodesController {
    pub fn new<S: PageSource<Item = Episode>>(source: Arc<S>, settings: InfiniteSettings, events: Sender<UIEvent>) -> Self {
        let model = Arc::new(InfiniteRowModel::new(settings));
        model.set_datasource(Arc::new(PagedBlockSource::new(source, model.settings().block_size)));
        Self {
            columns: episode_columns(),
            model,
            events,
        }
    }

    pub fn model(&self) -> &Arc<InfiniteRowModel<Episode>> {
        &self.model
    }

    /// Apply a (debounced) search term as the `name` filter
    pub fn set_search(&self, term: &str) {
        self.model.set_filter_model(FilterModel::name(term));
    }

    /// Sort each fetched page by a sortable column
    pub fn set_sort(&self, sort: Option<SortSpec>) -> Result<()> {
        let Some(spec) = sort else {
            self.model.set_sort_model(Vec::new());
            return Ok(());
        };
        if !self.columns.iter().any(|c| c.sortable && c.id == spec.field) {
            return Err(Error::Invalid {
                message: format!("Column '{}' is not sortable", spec.field),
            });
        }
        self.model.set_sort_model(vec![spec]);
        Ok(())
    }

    /// Rows in `range`; failures raise a toast, stale results do not
    pub async fn rows(&self, range: Range<usize>) -> Result<Vec<Episode>> {
        self.model
            .get_rows(range)
            .await
            .inspect_err(|e| report_load_error(&self.events, LOAD_FAILED, e))
    }

    /// Table text for `range`
    pub async fn render_rows(&self, range: Range<usize>) -> Result<String> {
        let mut table = DataTable::new(self.columns.clone());
        table.set_empty_message("No episodes found");
        table.set_rows(self.rows(range.clone()).await?);
        let count = match self.model.known_row_count() {
            Some(total) => format!("{total} episodes"),
            None => format!("{}+ episodes", self.model.row_count()),
        };
        Ok(format!(
            "{}\n\nrows {}..{} of {count}",
            table.render(),
            range.start,
            range.end
        ))
    }
}
