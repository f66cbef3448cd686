//! Pagination Component
//!
//! Page navigation for the client-side DataTable.

use std::ops::Range;

/// Pagination state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_items: usize,
    items_label: String,
}

impl Pagination {
    /// Create a pagination over `total_items`, starting at page 1
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items,
            items_label: "items".into(),
        }
    }

    /// Set the items label
    pub fn items_label(mut self, label: impl Into<String>) -> Self {
        self.items_label = label.into();
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// At least one page, even when empty
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Update the item count, clamping the current page
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Jump to a page, clamped to `1..=total_pages`
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn prev(&mut self) {
        if self.can_prev() {
            self.current_page -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.can_next() {
            self.current_page += 1;
        }
    }

    /// Row indices shown on the current page
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start.min(end)..end
    }

    /// Item count, e.g. `45 characters`
    pub fn summary(&self) -> String {
        format!("{} {}", self.total_items, self.items_label)
    }

    /// Page position, e.g. `1 / 3`
    pub fn position(&self) -> String {
        format!("{} / {}", self.current_page, self.total_pages())
    }

    pub fn render(&self) -> String {
        let prev = if self.can_prev() { "←" } else { " " };
        let next = if self.can_next() { "→" } else { " " };
        format!("{}    {} {} {}", self.summary(), prev, self.position(), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_and_ranges() {
        let mut pagination = Pagination::new(20, 45).items_label("characters");
        assert_eq!(pagination.total_pages(), 3);
        assert_eq!(pagination.summary(), "45 characters");
        assert_eq!(pagination.position(), "1 / 3");
        assert!(!pagination.can_prev());
        assert_eq!(pagination.visible_range(), 0..20);

        pagination.go_to(3);
        assert_eq!(pagination.visible_range(), 40..45);
        assert!(!pagination.can_next());

        pagination.next();
        assert_eq!(pagination.current_page(), 3);
        pagination.prev();
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn test_empty_has_one_page() {
        let pagination = Pagination::new(20, 0);
        assert_eq!(pagination.total_pages(), 1);
        assert_eq!(pagination.visible_range(), 0..0);
        assert_eq!(pagination.position(), "1 / 1");
    }

    #[test]
    fn test_shrinking_clamps_current_page() {
        let mut pagination = Pagination::new(20, 100);
        pagination.go_to(5);
        pagination.set_total_items(30);
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.visible_range(), 20..30);
    }
}
