//! Characters (Infinite Scroll) Controller
//!
//! Rows are pulled block by block. The search term and sort are baked into
//! the data source, so changing either installs a fresh one.

use crossbeam_channel::Sender;
use std::ops::Range;
use std::sync::Arc;

use crate::components::data_table::{Column, DataTable, InfiniteRowModel, InfiniteSettings, SharedDataSource};
use crate::domain::{Character, NameFilter, SortSpec};
use crate::error::{Error, Result};
use crate::features::characters::character_columns;
use crate::features::report_load_error;
use crate::loaders::PagedBlockSource;
use crate::services::PageSource;
use crate::states::UIEvent;

const LOAD_FAILED: &str = "Could not load characters";

/// Infinite characters page controller
pub struct CharactersInfiniteController<S: PageSource<Item = Character>> {
    source: Arc<S>,
    columns: Vec<Column<Character>>,
    model: Arc<InfiniteRowModel<Character>>,
    search: String,
    sort: Option<SortSpec>,
    events: Sender<UIEvent>,
}

impl<S: PageSource<Item = Character>> CharactersInfiniteController<S> {
    /// Create the controller and install the initial data source.
    ///
    /// Blocks line up with API pages: `settings.block_size` is the page size.
    pub fn new(source: Arc<S>, settings: InfiniteSettings, events: Sender<UIEvent>) -> Self {
        let controller = Self {
            source,
            columns: character_columns(),
            model: Arc::new(InfiniteRowModel::new(settings)),
            search: String::new(),
            sort: None,
            events,
        };
        controller.model.set_datasource(controller.create_datasource());
        controller
    }

    fn create_datasource(&self) -> SharedDataSource<Character> {
        Arc::new(
            PagedBlockSource::new(self.source.clone(), self.model.settings().block_size)
                .with_filter(NameFilter::from_term(&self.search))
                .with_sort(self.sort.clone()),
        )
    }

    pub fn model(&self) -> &Arc<InfiniteRowModel<Character>> {
        &self.model
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Apply a (debounced) search term; an unchanged term keeps the cache
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        if term == self.search {
            return;
        }
        self.search = term.to_string();
        tracing::debug!(search = %self.search, "Characters search changed");
        self.model.set_datasource(self.create_datasource());
    }

    /// Sort by a sortable column; `name` sorts server-side, the episode
    /// count sorts each fetched page
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        if let Some(spec) = &sort {
            if !self.columns.iter().any(|c| c.sortable && c.id == spec.field) {
                return Err(Error::Invalid {
                    message: format!("Column '{}' is not sortable", spec.field),
                });
            }
        }
        if sort != self.sort {
            self.sort = sort;
            self.model.set_datasource(self.create_datasource());
        }
        Ok(())
    }

    /// Rows in `range`; failures raise a toast, stale results do not
    pub async fn rows(&self, range: Range<usize>) -> Result<Vec<Character>> {
        self.model
            .get_rows(range)
            .await
            .inspect_err(|e| report_load_error(&self.events, LOAD_FAILED, e))
    }

    /// Table text for `range`
    pub async fn render_rows(&self, range: Range<usize>) -> Result<String> {
        let mut table = DataTable::new(self.columns.clone());
        table.set_empty_message("No characters found");
        table.set_rows(self.rows(range.clone()).await?);
        let count = match self.model.known_row_count() {
            Some(total) => format!("{total} characters"),
            None => format!("{}+ characters", self.model.row_count()),
        };
        Ok(format!(
            "{}\n\nrows {}..{} of {count}",
            table.render(),
            range.start,
            range.end
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;
    use crate::services::mock::{MockPageSource, sample_characters};

    type Controller = CharactersInfiniteController<MockPageSource<Character>>;

    fn controller(source: &MockPageSource<Character>) -> (Controller, crossbeam_channel::Receiver<UIEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let controller = CharactersInfiniteController::new(Arc::new(source.clone()), InfiniteSettings::default(), tx);
        (controller, rx)
    }

    #[tokio::test]
    async fn test_scroll_fetches_one_page_per_block() {
        let source = MockPageSource::new(sample_characters(45)).server_sort("name");
        let (controller, _rx) = controller(&source);

        let rows = controller.rows(0..40).await.expect("rows");
        assert_eq!(rows.len(), 40);
        assert_eq!(source.requested_pages(), vec![1, 2]);

        controller.rows(20..60).await.expect("rows");
        assert_eq!(source.requested_pages(), vec![1, 2, 3]);
        assert_eq!(controller.model().known_row_count(), Some(45));
    }

    #[tokio::test]
    async fn test_search_installs_new_datasource() {
        let source = MockPageSource::new(sample_characters(45)).server_sort("name");
        let (mut controller, _rx) = controller(&source);
        controller.rows(0..20).await.expect("rows");
        let generation = controller.model().generation();

        controller.set_search("Character 4");
        assert!(controller.model().generation() > generation);
        let rows = controller.rows(0..20).await.expect("rows");
        assert_eq!(rows.len(), 7);
        assert_eq!(source.requests()[1].filter, NameFilter::from_term("Character 4"));

        // Same term again: cache kept
        controller.set_search(" Character 4 ");
        controller.rows(0..20).await.expect("rows");
        assert_eq!(source.request_count(), 2);
    }

    #[tokio::test]
    async fn test_sort_split_between_server_and_page() {
        let source = MockPageSource::new(sample_characters(45)).server_sort("name");
        let (mut controller, _rx) = controller(&source);

        controller.set_sort(Some(SortSpec::asc("name"))).expect("sortable");
        controller.rows(0..20).await.expect("rows");
        assert_eq!(source.requests()[0].sort, Some(SortSpec::asc("name")));

        controller.set_sort(Some(SortSpec::new("episodeCount", SortDirection::Desc))).expect("sortable");
        let rows = controller.rows(20..40).await.expect("rows");
        assert_eq!(source.requests()[1].page, 2);
        assert_eq!(source.requests()[1].sort, None);
        assert!(rows.windows(2).all(|w| w[0].episode_count() >= w[1].episode_count()));

        assert!(controller.set_sort(Some(SortSpec::asc("status"))).is_err());
    }

    #[tokio::test]
    async fn test_name_sort_runs_locally_without_api_support() {
        let source = MockPageSource::new(sample_characters(45));
        let (mut controller, _rx) = controller(&source);

        controller.set_sort(Some(SortSpec::desc("name"))).expect("sortable");
        let rows = controller.rows(0..20).await.expect("rows");
        assert_eq!(source.requests()[0].sort, None);
        assert_eq!(rows[0].name, "Character 9");
        assert!(rows.windows(2).all(|w| w[0].name.to_lowercase() >= w[1].name.to_lowercase()));
    }

    #[tokio::test]
    async fn test_failure_raises_toast() {
        let source = MockPageSource::new(sample_characters(45)).fail_on_page(2);
        let (controller, rx) = controller(&source);

        assert!(controller.rows(20..40).await.is_err());
        let toasts: Vec<UIEvent> = rx.try_iter().collect();
        assert_eq!(toasts, vec![UIEvent::error_toast(LOAD_FAILED)]);

        // Rows before the failing block still load
        assert_eq!(controller.rows(0..20).await.expect("rows").len(), 20);
    }

    #[tokio::test]
    async fn test_render_rows() {
        let source = MockPageSource::new(sample_characters(45));
        let (controller, _rx) = controller(&source);

        let text = controller.render_rows(0..20).await.expect("render");
        assert!(text.contains("Character Name"));
        assert!(text.ends_with("rows 0..20 of 100+ characters"));
    }
}
