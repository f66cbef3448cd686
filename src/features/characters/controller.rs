//! Characters Controller
//!
//! Loads every page of characters, then serves search, sort and paging from
//! the client-side row model.

use crossbeam_channel::Sender;
use std::sync::Arc;

use super::columns::character_columns;
use crate::components::data_table::{ClientRowModel, DataProvider, DataTable, Pagination};
use crate::domain::{Character, SortSpec};
use crate::error::Result;
use crate::features::notify;
use crate::loaders::{EagerLoader, LoadOutcome, LoadStatus};
use crate::services::PageSource;
use crate::states::UIEvent;

const COLLECTION: &str = "characters";
const LOAD_FAILED: &str = "Could not load characters";

/// Characters page controller
pub struct CharactersController<S: PageSource<Item = Character>> {
    loader: EagerLoader<S>,
    model: ClientRowModel<Character>,
    page_size: usize,
    status: Option<LoadStatus>,
    events: Sender<UIEvent>,
}

impl<S: PageSource<Item = Character>> CharactersController<S> {
    /// Create a new controller
    pub fn new(source: Arc<S>, page_size: usize, events: Sender<UIEvent>) -> Self {
        Self {
            loader: EagerLoader::new(source, page_size),
            model: ClientRowModel::new(character_columns()),
            page_size: page_size.max(1),
            status: None,
            events,
        }
    }

    /// Fetch all characters; a failed page is reported with a toast and the
    /// rows loaded before it are kept
    pub async fn load(&mut self) -> LoadStatus {
        notify(&self.events, UIEvent::LoadingChanged { collection: COLLECTION, loading: true });

        let outcome = self.loader.load_all().await;
        let status = outcome.status();
        if let LoadOutcome::Partial { failed_page, .. } = &outcome {
            tracing::warn!(failed_page, loaded = outcome.items().len(), "Characters partially loaded");
        }
        if outcome.error().is_some() {
            notify(&self.events, UIEvent::error_toast(LOAD_FAILED));
        }

        self.model.set_rows(outcome.into_items());
        self.status = Some(status);

        notify(&self.events, UIEvent::LoadingChanged { collection: COLLECTION, loading: false });
        notify(
            &self.events,
            UIEvent::Loaded {
                collection: COLLECTION,
                status,
                rows: self.model.total_rows(),
            },
        );
        status
    }

    /// Status of the last load, `None` before the first
    pub fn status(&self) -> Option<LoadStatus> {
        self.status
    }

    pub fn model(&self) -> &ClientRowModel<Character> {
        &self.model
    }

    /// Quick filter across the filterable columns
    pub fn set_search(&mut self, term: &str) {
        self.model.set_quick_filter(term);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        self.model.set_sort(sort)
    }

    /// Pagination over the filtered rows, positioned on `page`
    pub fn pagination(&self, page: usize) -> Pagination {
        let mut pagination = Pagination::new(self.page_size, self.model.len()).items_label(COLLECTION);
        pagination.go_to(page);
        pagination
    }

    /// Rows of one client-side page
    pub fn page_rows(&self, page: usize) -> Vec<Character> {
        self.model.rows(self.pagination(page).visible_range())
    }

    /// Table text for one client-side page, followed by the pager line
    pub fn render_page(&self, page: usize) -> String {
        let pagination = self.pagination(page);
        let mut table = DataTable::new(self.model.columns().to_vec());
        table.set_loading(self.status.is_none());
        table.set_rows(self.model.rows(pagination.visible_range()));
        format!("{}\n\n{}", table.render(), pagination.render())
    }
}
