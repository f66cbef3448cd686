//! Infinite Row Model
//!
//! Virtualized row model backed by a [`BlockDataSource`]. Rows are fetched in
//! fixed-size blocks, kept in an LRU block cache, and requested one block at a
//! time.
//!
//! Every installed data source gets a new generation. A block that comes back
//! after its generation was replaced (new filter, new sort, new source) is
//! dropped instead of being cached.

use hashlink::LruCache;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

use crate::constants::{
    CACHE_BLOCK_SIZE, INFINITE_INITIAL_ROW_COUNT, MAX_BLOCKS_IN_CACHE,
    MAX_CONCURRENT_DATASOURCE_REQUESTS,
};
use crate::domain::{FilterModel, Record, SortSpec};
use crate::error::{Error, Result};
use crate::loaders::{BlockDataSource, RowRequest};

/// Shared handle to an installed data source
pub type SharedDataSource<R> = Arc<dyn BlockDataSource<Row = R>>;

/// Row model settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfiniteSettings {
    /// Rows per block, matches the API page size
    pub block_size: usize,
    pub max_blocks_in_cache: usize,
    /// Row count reported before the last row is known
    pub initial_row_count: usize,
    pub max_concurrent_requests: usize,
}

impl Default for InfiniteSettings {
    fn default() -> Self {
        Self {
            block_size: CACHE_BLOCK_SIZE,
            max_blocks_in_cache: MAX_BLOCKS_IN_CACHE,
            initial_row_count: INFINITE_INITIAL_ROW_COUNT,
            max_concurrent_requests: MAX_CONCURRENT_DATASOURCE_REQUESTS,
        }
    }
}

struct CacheState<R> {
    datasource: Option<SharedDataSource<R>>,
    generation: u64,
    blocks: LruCache<usize, Vec<R>>,
    highest_block: Option<usize>,
    last_row: Option<usize>,
    filter_model: FilterModel,
    sort_model: Vec<SortSpec>,
}

impl<R> CacheState<R> {
    fn reset(&mut self) -> u64 {
        self.generation += 1;
        self.blocks.clear();
        self.highest_block = None;
        self.last_row = None;
        self.generation
    }
}

/// Block-cached lazy row model
pub struct InfiniteRowModel<R: Record> {
    settings: InfiniteSettings,
    state: Mutex<CacheState<R>>,
    permits: Semaphore,
}

impl<R: Record> InfiniteRowModel<R> {
    pub fn new(settings: InfiniteSettings) -> Self {
        let settings = InfiniteSettings {
            block_size: settings.block_size.max(1),
            max_blocks_in_cache: settings.max_blocks_in_cache.max(1),
            max_concurrent_requests: settings.max_concurrent_requests.max(1),
            ..settings
        };
        Self {
            settings,
            state: Mutex::new(CacheState {
                datasource: None,
                generation: 0,
                blocks: LruCache::new(settings.max_blocks_in_cache),
                highest_block: None,
                last_row: None,
                filter_model: FilterModel::default(),
                sort_model: Vec::new(),
            }),
            permits: Semaphore::new(settings.max_concurrent_requests),
        }
    }

    pub fn settings(&self) -> InfiniteSettings {
        self.settings
    }

    fn state(&self) -> MutexGuard<'_, CacheState<R>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Install a data source, dropping every cached block
    pub fn set_datasource(&self, datasource: SharedDataSource<R>) -> u64 {
        let mut state = self.state();
        state.datasource = Some(datasource);
        let generation = state.reset();
        tracing::debug!(generation, "Data source replaced");
        generation
    }

    /// Set column filters passed to the data source; purges the cache
    pub fn set_filter_model(&self, model: FilterModel) {
        let mut state = self.state();
        if state.filter_model != model {
            state.filter_model = model;
            state.reset();
        }
    }

    pub fn filter_model(&self) -> FilterModel {
        self.state().filter_model.clone()
    }

    /// Set the sort model passed to the data source; purges the cache
    pub fn set_sort_model(&self, model: Vec<SortSpec>) {
        let mut state = self.state();
        if state.sort_model != model {
            state.sort_model = model;
            state.reset();
        }
    }

    /// Drop cached blocks; requests in flight become stale
    pub fn purge(&self) {
        self.state().reset();
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Row count once the data source reported its last row
    pub fn known_row_count(&self) -> Option<usize> {
        self.state().last_row
    }

    /// Rows the grid should show: exact once known, estimated before
    pub fn row_count(&self) -> usize {
        let state = self.state();
        if let Some(last_row) = state.last_row {
            return last_row;
        }
        let loaded = state
            .highest_block
            .map_or(0, |block| (block + 2) * self.settings.block_size);
        loaded.max(self.settings.initial_row_count)
    }

    pub fn cached_block_count(&self) -> usize {
        self.state().blocks.len()
    }

    fn block_range(&self, rows: &Range<usize>) -> Range<usize> {
        let size = self.settings.block_size;
        if rows.is_empty() {
            return 0..0;
        }
        rows.start / size..(rows.end - 1) / size + 1
    }

    /// Load one block, from cache when possible
    #[tracing::instrument(skip(self))]
    pub async fn load_block(&self, block: usize) -> Result<Vec<R>> {
        let start_row = block * self.settings.block_size;
        {
            let mut state = self.state();
            if state.last_row.is_some_and(|last| start_row >= last) {
                return Ok(Vec::new());
            }
            if let Some(rows) = state.blocks.get(&block) {
                return Ok(rows.clone());
            }
        }

        let _permit = self.permits.acquire().await.map_err(|_| Error::Invalid {
            message: "row model is closed".to_string(),
        })?;

        let (datasource, generation, request) = {
            let mut state = self.state();
            if let Some(rows) = state.blocks.get(&block) {
                return Ok(rows.clone());
            }
            let datasource = state.datasource.clone().ok_or_else(|| Error::Invalid {
                message: "no data source installed".to_string(),
            })?;
            let request = RowRequest {
                start_row,
                end_row: start_row + self.settings.block_size,
                filter_model: state.filter_model.clone(),
                sort_model: state.sort_model.clone(),
            };
            (datasource, state.generation, request)
        };

        let result = datasource.get_rows(request).await;

        let mut state = self.state();
        if state.generation != generation {
            tracing::debug!(
                block,
                generation,
                current = state.generation,
                "Discarding stale block"
            );
            return Err(Error::Superseded {
                current: state.generation,
            });
        }

        let loaded = result?;
        if let Some(last_row) = loaded.last_row {
            state.last_row = Some(last_row);
        }
        state.highest_block = Some(state.highest_block.map_or(block, |h| h.max(block)));
        state.blocks.insert(block, loaded.rows.clone());
        Ok(loaded.rows)
    }

    /// Whether every block covering `range` is cached
    pub fn is_range_loaded(&self, range: Range<usize>) -> bool {
        let blocks = self.block_range(&range);
        let state = self.state();
        blocks.into_iter().all(|block| state.blocks.contains_key(&block))
    }

    /// Rows in `range`, loading missing blocks one after another
    pub async fn get_rows(&self, range: Range<usize>) -> Result<Vec<R>> {
        let size = self.settings.block_size;
        let mut rows = Vec::new();
        for block in self.block_range(&range) {
            let block_rows = self.load_block(block).await?;
            let block_start = block * size;
            let from = range.start.saturating_sub(block_start).min(block_rows.len());
            let to = (range.end - block_start).min(block_rows.len());
            rows.extend_from_slice(&block_rows[from..to]);
            if block_rows.len() < size {
                break;
            }
        }
        Ok(rows)
    }
}
