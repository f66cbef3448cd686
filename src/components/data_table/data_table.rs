//! DataTable Component
//!
//! Plain-text table renderer shared by every grid page.

use super::column::Column;
use crate::domain::Record;

const COLUMN_GAP: &str = "  ";

/// DataTable component
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    loading: bool,
    empty_message: String,
}

impl<R: Record> DataTable<R> {
    /// Create a new data table
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            loading: false,
            empty_message: "No data".into(),
        }
    }

    /// Set the rows
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Set loading state
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Set the empty message
    pub fn set_empty_message(&mut self, message: impl Into<String>) {
        self.empty_message = message.into();
    }

    fn widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.label.chars().count()))
                    .max()
                    .unwrap_or(0);
                col.width.resolve(content)
            })
            .collect()
    }

    fn render_line(cells: &[String], widths: &[usize]) -> String {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| fit(cell, width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        line.trim_end().to_string()
    }

    /// Render header, separator and rows
    pub fn render(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| self.columns.iter().map(|col| col.display(row)).collect())
            .collect();
        let widths = self.widths(&cells);

        let header: Vec<String> = self.columns.iter().map(|c| c.label.to_string()).collect();
        let mut out = vec![
            Self::render_line(&header, &widths),
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        ];

        if self.loading {
            out.push("Loading...".to_string());
        } else if cells.is_empty() {
            out.push(self.empty_message.clone());
        } else {
            out.extend(cells.iter().map(|row| Self::render_line(row, &widths)));
        }
        out.join("\n")
    }
}

/// Pad or truncate `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
