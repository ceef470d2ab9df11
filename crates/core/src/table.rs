//! Entity tables: columns, formatted rows, search and sort.
//!
//! Rows are formatted once from their records. Searching filters on the
//! kind's search column (case-insensitive substring); sorting is stable and
//! uses a typed key per cell so dates and prices sort by value, not by their
//! text.

use core::cmp::Ordering;
use core::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::types::format_created_at;

/// A record listed in an entity table.
pub trait ListRecord {
    const KIND: EntityKind;

    /// Columns, in display order; every row has one cell per column.
    fn columns() -> Vec<Column>;

    fn row(&self) -> TableRow;
}

/// A column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

impl Column {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Value a cell sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Number(Decimal),
    Time(DateTime<Utc>),
}

/// One formatted cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    /// Color swatch shown next to the text.
    pub swatch: Option<String>,
    pub sort: SortKey,
}

impl TableCell {
    /// Plain text cell that sorts case-insensitively by its text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            sort: SortKey::Text(text.to_lowercase()),
            swatch: None,
            text,
        }
    }

    /// Formatted number that sorts by its value.
    #[must_use]
    pub fn number(text: impl Into<String>, value: Decimal) -> Self {
        Self {
            text: text.into(),
            swatch: None,
            sort: SortKey::Number(value),
        }
    }

    /// Formatted timestamp that sorts chronologically.
    #[must_use]
    pub fn time(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            swatch: None,
            sort: SortKey::Time(at),
        }
    }

    /// `createdAt` column: `October 19th, 2026`.
    #[must_use]
    pub fn created(at: DateTime<Utc>) -> Self {
        Self::time(format_created_at(&at), at)
    }

    /// Yes/No cell for a flag.
    #[must_use]
    pub fn flag(value: bool) -> Self {
        Self::text(if value { "Yes" } else { "No" })
    }

    /// Show a color swatch next to the text.
    #[must_use]
    pub fn with_swatch(mut self, color: &str) -> Self {
        self.swatch = Some(color.to_string());
        self
    }
}

/// One table row: the record id plus one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    #[must_use]
    pub fn new(id: impl Display, cells: Vec<TableCell>) -> Self {
        Self {
            id: id.to_string(),
            cells,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Formatted rows of one entity kind, in server order (newest first).
#[derive(Debug, Clone)]
pub struct Table {
    pub kind: EntityKind,
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Format `records` into a table.
    #[must_use]
    pub fn from_records<R: ListRecord>(records: &[R]) -> Self {
        Self {
            kind: R::KIND,
            columns: R::columns(),
            rows: records.iter().map(ListRecord::row).collect(),
        }
    }

    /// `"<Entities> (<count>)"`, counting every row regardless of search.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.kind.plural_label(), self.rows.len())
    }

    /// `"Search by <column>..."`.
    #[must_use]
    pub fn search_placeholder(&self) -> String {
        format!("Search by {}...", self.kind.search_key())
    }

    fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Rows whose search column contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&TableRow> {
        let needle = query.trim().to_lowercase();
        let index = self.column_index(self.kind.search_key());
        self.rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || index
                        .and_then(|i| row.cells.get(i))
                        .is_some_and(|cell| cell.text.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Search, then sort by `sort` if it names a column.
    ///
    /// Unknown sort keys leave the server order untouched.
    #[must_use]
    pub fn view(&self, query: &str, sort: Option<(&str, SortDir)>) -> Vec<&TableRow> {
        let mut rows = self.search(query);
        if let Some((index, dir)) = sort.and_then(|(key, dir)| Some((self.column_index(key)?, dir))) {
            rows.sort_by(|a, b| {
                let ordering: Ordering = a
                    .cells
                    .get(index)
                    .map(|c| &c.sort)
                    .cmp(&b.cells.get(index).map(|c| &c.sort));
                match dir {
                    SortDir::Asc => ordering,
                    SortDir::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn row(id: &str, label: &str, day: u32) -> TableRow {
        let at = Utc.with_ymd_and_hms(2026, 10, day, 0, 0, 0).unwrap();
        TableRow::new(id, vec![TableCell::text(label), TableCell::created(at)])
    }

    fn billboards() -> Table {
        Table {
            kind: EntityKind::Billboard,
            columns: vec![Column::new("label", "Label"), Column::new("createdAt", "Date")],
            rows: vec![
                row("1", "Summer Sale", 9),
                row("2", "winter", 19),
                row("3", "SUMMER drop", 1),
            ],
        }
    }

    fn ids(rows: &[&TableRow]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let table = billboards();
        assert_eq!(ids(&table.search("summer")), vec!["1", "3"]);
        assert_eq!(ids(&table.search("  ")), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_heading_and_placeholder() {
        let table = billboards();
        assert_eq!(table.heading(), "Billboards (3)");
        assert_eq!(table.search_placeholder(), "Search by label...");
    }

    #[test]
    fn test_sort_by_time_not_text() {
        let table = billboards();
        assert_eq!(
            ids(&table.view("", Some(("createdAt", SortDir::Desc)))),
            vec!["2", "1", "3"]
        );
    }

    #[test]
    fn test_sort_by_text_and_unknown_key() {
        let table = billboards();
        assert_eq!(
            ids(&table.view("", Some(("label", SortDir::Asc)))),
            vec!["3", "1", "2"]
        );
        assert_eq!(ids(&table.view("", Some(("missing", SortDir::Asc)))), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_created_cell_text() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(TableCell::created(at).text, "October 19th, 2026");
        assert_eq!(TableCell::flag(true).text, "Yes");
        assert_eq!(TableCell::flag(false).text, "No");
    }

    #[test]
    fn test_sort_dir_flip() {
        assert_eq!(SortDir::Asc.flipped(), SortDir::Desc);
        assert_eq!(SortDir::default().as_str(), "asc");
    }
}
