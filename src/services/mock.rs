//! # Mock Page Source
//!
//! Scripted in-memory [`PageSource`] for testing loaders and controllers
//! without the network.
//!
//! The source pages over a fixed dataset the way the query API does: the
//! `name` filter is a case-insensitive substring match, fields registered with
//! [`MockPageSource::server_sort`] are sorted before paging, and pages listed
//! with [`MockPageSource::fail_on_page`] return an error. Every request is
//! recorded so tests can assert on call counts and order.
//!
//! ```ignore
//! let source = MockPageSource::new(characters(45)).fail_on_page(2);
//! let outcome = EagerLoader::new(Arc::new(source.clone()), 20).load_all().await;
//! assert_eq!(source.requested_pages(), vec![1, 2]);
//! ```

use futures::future::BoxFuture;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::constants::PAGE_SIZE;
use crate::domain::{Character, Episode, IdRef, Origin, Page, PageRequest, Record, SortDirection};
use crate::error::{Error, Result};
use crate::services::PageSource;

#[derive(Default)]
struct Script {
    fail_pages: HashSet<u32>,
    /// Extra latency per page
    delays: Vec<(u32, Duration)>,
    requests: Vec<PageRequest>,
    /// Reported total from a page onward, to simulate a dataset that changes
    /// while it is paged through
    totals: Vec<(u32, usize)>,
}

/// In-memory paged collection with scripted failures and latency
pub struct MockPageSource<T: Record> {
    items: Arc<Vec<T>>,
    sort_fields: Vec<String>,
    collection: &'static str,
    script: Arc<Mutex<Script>>,
}

impl<T: Record> Clone for MockPageSource<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            sort_fields: self.sort_fields.clone(),
            collection: self.collection,
            script: self.script.clone(),
        }
    }
}

impl<T: Record> MockPageSource<T> {
    /// Source over `items` with the API's page size
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            sort_fields: Vec::new(),
            collection: "records",
            script: Arc::default(),
        }
    }

    pub fn collection(mut self, collection: &'static str) -> Self {
        self.collection = collection;
        self
    }

    /// Let the "server" sort by `field`
    pub fn server_sort(mut self, field: &str) -> Self {
        self.sort_fields.push(field.to_string());
        self
    }

    pub fn fail_on_page(self, page: u32) -> Self {
        self.script().fail_pages.insert(page);
        self
    }

    pub fn delay_page(self, page: u32, delay: Duration) -> Self {
        self.script().delays.push((page, delay));
        self
    }

    /// Report `total` as the collection size for `from_page` and later pages
    pub fn report_total(self, from_page: u32, total: usize) -> Self {
        self.script().totals.push((from_page, total));
        self
    }

    /// Stop failing a page
    pub fn heal_page(&self, page: u32) {
        self.script().fail_pages.remove(&page);
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.script().requests.clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.script().requests.iter().map(|r| r.page).collect()
    }

    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn matching(&self, request: &PageRequest) -> Vec<T> {
        let needle = request
            .filter
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .map(str::to_lowercase);

        let mut rows: Vec<T> = self
            .items
            .iter()
            .filter(|item| match &needle {
                Some(needle) => item
                    .field("name")
                    .is_some_and(|name| name.to_string().to_lowercase().contains(needle)),
                None => true,
            })
            .cloned()
            .collect();

        if let Some(sort) = &request.sort {
            if self.sort_fields.contains(&sort.field) {
                rows.sort_by(|a, b| {
                    let ord = a.field(&sort.field).cmp(&b.field(&sort.field));
                    match sort.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
            }
        }
        rows
    }
}

impl<T: Record> PageSource for MockPageSource<T> {
    type Item = T;

    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<Page<T>>> {
        Box::pin(async move {
            let (fails, delay, reported_total) = {
                let mut script = self.script();
                script.requests.push(request.clone());
                let delay = script
                    .delays
                    .iter()
                    .find(|(page, _)| *page == request.page)
                    .map(|(_, delay)| *delay);
                (
                    script.fail_pages.contains(&request.page),
                    delay,
                    script
                        .totals
                        .iter()
                        .filter(|(from, _)| *from <= request.page)
                        .max_by_key(|(from, _)| *from)
                        .map(|(_, total)| *total),
                )
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fails {
                return Err(Error::GraphQl {
                    message: format!("scripted failure on page {}", request.page),
                });
            }

            let rows = self.matching(&request);
            let total_count = reported_total.unwrap_or(rows.len());
            let start = (request.page.max(1) as usize - 1) * PAGE_SIZE;
            let items = rows.into_iter().skip(start).take(PAGE_SIZE).collect();
            Ok(Page { items, total_count })
        })
    }

    fn supports_server_sort(&self, field: &str) -> bool {
        self.sort_fields.iter().any(|f| f == field)
    }

    fn collection(&self) -> &'static str {
        self.collection
    }
}

/// `count` characters named `Character N`, appearing in `N % 7 + 1` episodes
pub fn sample_characters(count: usize) -> Vec<Character> {
    (1..=count)
        .map(|n| Character {
            id: n.to_string(),
            name: format!("Character {n}"),
            status: if n % 3 == 0 { "Dead" } else { "Alive" }.to_string(),
            species: "Human".to_string(),
            gender: if n % 2 == 0 { "Female" } else { "Male" }.to_string(),
            episode: (0..n % 7 + 1)
                .map(|e| IdRef { id: e.to_string() })
                .collect(),
            origin: Some(Origin {
                name: "Earth (C-137)".to_string(),
            }),
            image: None,
        })
        .collect()
}

/// `count` episodes coded `S01E..`, each with `N % 5 + 1` characters
pub fn sample_episodes(count: usize) -> Vec<Episode> {
    (1..=count)
        .map(|n| Episode {
            id: n.to_string(),
            name: format!("Episode {n}"),
            air_date: "December 2, 2013".to_string(),
            episode: format!("S01E{n:02}"),
            characters: (0..n % 5 + 1)
                .map(|c| IdRef { id: c.to_string() })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NameFilter, SortSpec};

    #[tokio::test]
    async fn test_pages_over_dataset() {
        let source = MockPageSource::new(sample_characters(45));

        let third = source.fetch_page(PageRequest::new(3)).await.expect("page");
        assert_eq!(third.items.len(), 5);
        assert_eq!(third.total_count, 45);
        assert_eq!(third.items[0].id, "41");
        assert_eq!(source.requested_pages(), vec![3]);
    }

    #[tokio::test]
    async fn test_filter_and_server_sort() {
        let source = MockPageSource::new(sample_characters(30)).server_sort("name");
        let request = PageRequest::new(1)
            .with_filter(NameFilter::from_term("character 2"))
            .with_sort(Some(SortSpec::desc("name")));

        let page = source.fetch_page(request).await.expect("page");
        assert_eq!(page.total_count, 11);
        assert_eq!(page.items[0].name, "Character 29");
    }

    #[tokio::test]
    async fn test_scripted_failure_and_heal() {
        let source = MockPageSource::new(sample_episodes(5)).fail_on_page(1);
        assert!(source.fetch_page(PageRequest::new(1)).await.is_err());

        source.heal_page(1);
        assert!(source.fetch_page(PageRequest::new(1)).await.is_ok());
        assert_eq!(source.request_count(), 2);
    }
}
