//! DataTable Component
//!
//! Column definitions, row models and the text renderer for the grid pages.

pub mod column;
pub mod data_provider;
pub mod data_table;
pub mod infinite;
pub mod pagination;

pub use column::{Column, ColumnWidth};
pub use data_provider::{ClientRowModel, DataProvider};
pub use data_table::DataTable;
pub use infinite::{InfiniteRowModel, InfiniteSettings, SharedDataSource};
pub use pagination::Pagination;
