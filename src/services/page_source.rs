//! PageSource - Paged Query API Abstraction
//!
//! Loaders only see this trait; the GraphQL sources and the scripted mock
//! both implement it.

use futures::future::BoxFuture;

use crate::domain::{Page, PageRequest, Record};
use crate::error::Result;

/// A paged collection behind the query API
pub trait PageSource: Send + Sync + 'static {
    type Item: Record;

    /// Fetch one page
    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<Page<Self::Item>>>;

    /// Whether the API can sort by `field` itself
    fn supports_server_sort(&self, _field: &str) -> bool {
        false
    }

    /// Name used in logs and notifications, e.g. `"characters"`
    fn collection(&self) -> &'static str;
}
