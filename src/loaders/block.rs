//! On-demand block loader
//!
//! A pull-based data source for the infinite row model. Each row-range
//! request maps to exactly one API page:
//!
//! ```text
//! RowRequest { start_row: 40, end_row: 60 }
//!        │  page = start_row / page_size + 1
//!        ▼
//! PageRequest { page: 3, filter, sort? }
//!        │
//!        ▼
//! RowBlock { rows, last_row: Some(total) | None }
//! ```
//!
//! Sort keys the API understands are forwarded. Any other key (a derived
//! count, for instance) is applied to the fetched page only; rows in other
//! blocks are not reordered.

use futures::future::BoxFuture;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::{FilterModel, NameFilter, PageRequest, Record, SortDirection, SortSpec, reaches_end};
use crate::error::{Error, Result};
use crate::services::PageSource;

/// A row range requested by the grid, `[start_row, end_row)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRequest {
    pub start_row: usize,
    pub end_row: usize,
    pub filter_model: FilterModel,
    pub sort_model: Vec<SortSpec>,
}

impl RowRequest {
    pub fn new(start_row: usize, end_row: usize) -> Self {
        Self {
            start_row,
            end_row,
            ..Default::default()
        }
    }
}

/// Rows answering one [`RowRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBlock<T> {
    pub rows: Vec<T>,
    /// Total row count once the last page has been reached
    pub last_row: Option<usize>,
}

impl<T> RowBlock<T> {
    /// Last row as the grid protocol reports it: `-1` while more rows remain
    pub fn last_row_index(&self) -> i64 {
        self.last_row
            .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
    }
}

/// Pull interface a virtualized grid uses to request rows lazily.
///
/// `Ok` is the success callback, `Err` the failure callback.
pub trait BlockDataSource: Send + Sync {
    type Row: Record;

    fn get_rows(&self, request: RowRequest) -> BoxFuture<'_, Result<RowBlock<Self::Row>>>;
}

/// Map an aligned start row to its 1-based page number
pub fn page_for_row(start_row: usize, page_size: usize) -> Result<u32> {
    if page_size == 0 || start_row % page_size != 0 {
        return Err(Error::Invalid {
            message: format!("start row {start_row} is not aligned to page size {page_size}"),
        });
    }
    u32::try_from(start_row / page_size + 1).map_err(|_| Error::Invalid {
        message: format!("start row {start_row} is out of range"),
    })
}

/// Stable sort of one page by a column field
pub fn sort_page_locally<T: Record>(rows: &mut [T], sort: &SortSpec) {
    rows.sort_by(|a, b| {
        let ord = compare_field(a, b, &sort.field);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare_field<T: Record>(a: &T, b: &T, field: &str) -> Ordering {
    a.field(field).cmp(&b.field(field))
}

/// Block data source over a [`PageSource`], one page per block.
///
/// The filter term and sort key are fixed when the source is built; a new
/// term or key means a new source. Without a fixed filter or sort, the
/// request's own filter and sort models are used.
pub struct PagedBlockSource<S: PageSource> {
    source: Arc<S>,
    page_size: usize,
    filter: Option<NameFilter>,
    sort: Option<SortSpec>,
}

impl<S: PageSource> PagedBlockSource<S> {
    pub fn new(source: Arc<S>, page_size: usize) -> Self {
        Self {
            source,
            page_size,
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

    async fn load(&self, request: RowRequest) -> Result<RowBlock<S::Item>> {
        let page = page_for_row(request.start_row, self.page_size)?;
        let filter = self
            .filter
            .clone()
            .or_else(|| request.filter_model.to_name_filter());
        let sort = self
            .sort
            .clone()
            .or_else(|| request.sort_model.first().cloned());

        let (server_sort, local_sort) = match sort {
            Some(spec) if self.source.supports_server_sort(&spec.field) => (Some(spec), None),
            Some(spec) => (None, Some(spec)),
            None => (None, None),
        };

        tracing::debug!(
            collection = self.source.collection(),
            start_row = request.start_row,
            end_row = request.end_row,
            page,
            "Asking for rows"
        );

        let result = self
            .source
            .fetch_page(
                PageRequest::new(page)
                    .with_filter(filter)
                    .with_sort(server_sort),
            )
            .await?;

        let mut rows = result.items;
        if let Some(spec) = &local_sort {
            sort_page_locally(&mut rows, spec);
        }

        let last_row = reaches_end(page, self.page_size, result.total_count).then_some(result.total_count);
        Ok(RowBlock { rows, last_row })
    }
}

impl<S: PageSource> BlockDataSource for PagedBlockSource<S> {
    type Row = S::Item;

    fn get_rows(&self, request: RowRequest) -> BoxFuture<'_, Result<RowBlock<S::Item>>> {
        Box::pin(async move {
            let start_row = request.start_row;
            self.load(request).await.inspect_err(|e| {
                tracing::error!(
                    collection = self.source.collection(),
                    start_row,
                    error = %e,
                    "Error fetching rows"
                );
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Character;
    use crate::services::mock::{MockPageSource, sample_characters};

    fn block_source(source: &MockPageSource<Character>) -> PagedBlockSource<MockPageSource<Character>> {
        PagedBlockSource::new(Arc::new(source.clone()), 20)
    }

    fn episode_counts(rows: &[Character]) -> Vec<usize> {
        rows.iter().map(Character::episode_count).collect()
    }

    #[test]
    fn test_page_for_row() {
        assert_eq!(page_for_row(0, 20).expect("aligned"), 1);
        assert_eq!(page_for_row(20, 20).expect("aligned"), 2);
        assert_eq!(page_for_row(40, 20).expect("aligned"), 3);
        assert!(page_for_row(15, 20).is_err());
        assert!(page_for_row(0, 0).is_err());
    }

    #[test]
    fn test_last_row_index_sentinel() {
        let more: RowBlock<Character> = RowBlock { rows: vec![], last_row: None };
        let done: RowBlock<Character> = RowBlock { rows: vec![], last_row: Some(45) };
        assert_eq!(more.last_row_index(), -1);
        assert_eq!(done.last_row_index(), 45);
    }

    #[tokio::test]
    async fn test_reports_last_row_only_at_end() {
        let source = MockPageSource::new(sample_characters(45));
        let ds = block_source(&source);

        let first = ds.get_rows(RowRequest::new(0, 20)).await.expect("rows");
        assert_eq!(first.rows.len(), 20);
        assert_eq!(first.last_row, None);

        let last = ds.get_rows(RowRequest::new(40, 60)).await.expect("rows");
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.last_row, Some(45));
        assert_eq!(source.requested_pages(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_derived_sort_is_page_local() {
        let source = MockPageSource::new(sample_characters(60)).server_sort("name");
        let ds = block_source(&source).with_sort(Some(SortSpec::desc("episodeCount")));

        let block = ds.get_rows(RowRequest::new(20, 40)).await.expect("rows");

        // The API was asked for page 2 unsorted
        assert_eq!(source.requests()[0].page, 2);
        assert_eq!(source.requests()[0].sort, None);

        // Same 20 records as the unsorted page, reordered by descending count
        let mut ids: Vec<u32> = block.rows.iter().map(|c| c.id.parse().expect("id")).collect();
        ids.sort_unstable();
        assert_eq!(ids, (21..=40).collect::<Vec<u32>>());
        let counts = episode_counts(&block.rows);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");

        // Other pages keep their API order
        let unsorted = block_source(&source).get_rows(RowRequest::new(0, 20)).await.expect("rows");
        assert_eq!(unsorted.rows[0].id, "1");
    }

    #[tokio::test]
    async fn test_server_sort_is_forwarded() {
        let source = MockPageSource::new(sample_characters(30)).server_sort("name");
        let ds = block_source(&source).with_sort(Some(SortSpec::asc("name")));

        ds.get_rows(RowRequest::new(0, 20)).await.expect("rows");
        assert_eq!(source.requests()[0].sort, Some(SortSpec::asc("name")));
    }

    #[tokio::test]
    async fn test_request_models_used_without_fixed_terms() {
        let source = MockPageSource::new(sample_characters(30));
        let ds = block_source(&source);
        let request = RowRequest {
            filter_model: FilterModel::name("Character 1"),
            sort_model: vec![SortSpec::desc("episodeCount"), SortSpec::asc("name")],
            ..RowRequest::new(0, 20)
        };

        let block = ds.get_rows(request).await.expect("rows");
        assert_eq!(source.requests()[0].filter, NameFilter::from_term("Character 1"));
        assert_eq!(block.last_row, Some(11));
        let counts = episode_counts(&block.rows);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let source = MockPageSource::new(sample_characters(45)).fail_on_page(2);
        let ds = block_source(&source);

        assert!(ds.get_rows(RowRequest::new(20, 40)).await.is_err());
        assert!(ds.get_rows(RowRequest::new(7, 27)).await.is_err());
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_requests_are_idempotent() {
        let source = MockPageSource::new(sample_characters(45));
        let ds = block_source(&source).with_sort(Some(SortSpec::asc("episodeCount")));

        let a = ds.get_rows(RowRequest::new(20, 40)).await.expect("rows");
        let b = ds.get_rows(RowRequest::new(20, 40)).await.expect("rows");
        assert_eq!(a, b);
    }
}
