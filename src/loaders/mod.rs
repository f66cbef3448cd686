//! Loaders
//!
//! The two strategies for getting paged API data into a grid:
//! - [`EagerLoader`]: fetch everything up front, filter and sort client-side
//! - [`PagedBlockSource`]: fetch one page per row block on demand

pub mod block;
pub mod eager;

pub use block::{BlockDataSource, PagedBlockSource, RowBlock, RowRequest, page_for_row, sort_page_locally};
pub use eager::{EagerLoader, LoadOutcome, LoadStatus};
