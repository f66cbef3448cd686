//! Eager-load-all loader
//!
//! Fetches every page of a collection sequentially and hands back one
//! in-memory sequence for client-side filtering and sorting. A failed page
//! stops the loop; whatever was collected so far is kept and the outcome says
//! so.

use std::sync::Arc;

use crate::domain::{NameFilter, PageRequest, reaches_end};
use crate::error::Error;
use crate::services::PageSource;

/// Status tag of a [`LoadOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Complete,
    Partial,
    Failed,
}

/// Result of an eager load
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// Every page was fetched
    Complete { items: Vec<T>, total_count: usize },
    /// Some pages were fetched before `failed_page` failed
    Partial {
        items: Vec<T>,
        total_count: usize,
        failed_page: u32,
        error: Error,
    },
    /// The first page failed, nothing was fetched
    Failed { error: Error },
}

impl<T> LoadOutcome<T> {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadOutcome::Complete { .. } => LoadStatus::Complete,
            LoadOutcome::Partial { .. } => LoadStatus::Partial,
            LoadOutcome::Failed { .. } => LoadStatus::Failed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == LoadStatus::Complete
    }

    pub fn items(&self) -> &[T] {
        match self {
            LoadOutcome::Complete { items, .. } | LoadOutcome::Partial { items, .. } => items.as_slice(),
            LoadOutcome::Failed { .. } => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            LoadOutcome::Complete { items, .. } | LoadOutcome::Partial { items, .. } => items,
            LoadOutcome::Failed { .. } => Vec::new(),
        }
    }

    /// Total advertised by the API, if any page arrived
    pub fn total_count(&self) -> Option<usize> {
        match self {
            LoadOutcome::Complete { total_count, .. } | LoadOutcome::Partial { total_count, .. } => {
                Some(*total_count)
            }
            LoadOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            LoadOutcome::Complete { .. } => None,
            LoadOutcome::Partial { error, .. } | LoadOutcome::Failed { error } => Some(error),
        }
    }
}

/// Accumulator owned by one `load_all` call
struct LoaderState<T> {
    accumulated: Vec<T>,
    current_page: u32,
    done: bool,
}

/// Loads every page of a [`PageSource`]
pub struct EagerLoader<S: PageSource> {
    source: Arc<S>,
    page_size: usize,
    filter: Option<NameFilter>,
}

impl<S: PageSource> EagerLoader<S> {
    pub fn new(source: Arc<S>, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            filter: None,
        }
    }

    /// Filter server-side instead of loading the whole collection
    pub fn with_filter(mut self, filter: Option<NameFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Fetch pages 1, 2, ... until `page * page_size >= total_count`.
    ///
    /// Pages are requested strictly one after another, so items keep API
    /// order. Never fails: errors are reported through the outcome.
    #[tracing::instrument(skip(self), fields(collection = self.source.collection()))]
    pub async fn load_all(&self) -> LoadOutcome<S::Item> {
        let mut state = LoaderState {
            accumulated: Vec::new(),
            current_page: 1,
            done: false,
        };
        let mut total_count = 0;

        while !state.done {
            let request = PageRequest::new(state.current_page).with_filter(self.filter.clone());
            match self.source.fetch_page(request).await {
                Ok(page) => {
                    total_count = page.total_count;
                    state.accumulated.extend(page.items);
                    state.done = reaches_end(state.current_page, self.page_size, total_count);
                    tracing::debug!(
                        page = state.current_page,
                        total = total_count,
                        loaded = state.accumulated.len(),
                        "Page loaded"
                    );
                    if !state.done {
                        state.current_page += 1;
                    }
                }
                Err(error) if state.current_page == 1 => {
                    tracing::error!(error = %error, "First page failed, nothing loaded");
                    return LoadOutcome::Failed { error };
                }
                Err(error) => {
                    tracing::warn!(
                        page = state.current_page,
                        loaded = state.accumulated.len(),
                        total = total_count,
                        error = %error,
                        "Page failed, keeping partial result"
                    );
                    return LoadOutcome::Partial {
                        items: state.accumulated,
                        total_count,
                        failed_page: state.current_page,
                        error,
                    };
                }
            }
        }

        if state.accumulated.len() != total_count {
            tracing::warn!(
                loaded = state.accumulated.len(),
                total = total_count,
                "Collection changed while loading"
            );
        }
        tracing::info!(pages = state.current_page, total = total_count, "Collection loaded");
        LoadOutcome::Complete {
            items: state.accumulated,
            total_count,
        }
    }
}
