//! Dashboard Constants
//!
//! Centralized constants for the query API, grid row models and UI feedback.

/// Default GraphQL endpoint of the public dataset
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// Records per API page, fixed by the remote API
pub const PAGE_SIZE: usize = 20;

/// Request timeout for a single page query
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay before a search box change is applied
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Infinite row model settings
pub const CACHE_BLOCK_SIZE: usize = PAGE_SIZE;
pub const MAX_BLOCKS_IN_CACHE: usize = 10;
pub const INFINITE_INITIAL_ROW_COUNT: usize = 100;
pub const MAX_CONCURRENT_DATASOURCE_REQUESTS: usize = 1;

/// Widest row window a single view may ask for
pub const MAX_ROWS_PER_VIEW: usize = 500;

/// The episodes grid keeps a smaller block cache
pub const EPISODES_MAX_BLOCKS_IN_CACHE: usize = 2;

/// Toast history kept by the dashboard shell
pub const TOAST_HISTORY_CAPACITY: usize = 50;

/// Project directory identifiers
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "rm-dashboard";
pub const APP_NAME: &str = "rm-dashboard";
