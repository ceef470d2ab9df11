//! Data table component for list pages.
//!
//! Rows, search and sort come from [`storeboard_core::table`]; this module
//! only adds what a server-rendered page needs: the `?q=&sort=&dir=` query
//! and sort links in the column headers.

use serde::Deserialize;

use storeboard_core::table::{Column, SortDir};

/// Shown in place of rows when nothing matches.
pub const EMPTY_TITLE: &str = "No results.";

/// Search and sort parameters of a list page (`?q=...&sort=...&dir=...`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
    #[serde(default)]
    pub dir: SortDir,
}

impl TableQuery {
    /// The requested sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<(&str, SortDir)> {
        self.sort.as_deref().map(|key| (key, self.dir))
    }
}

/// A rendered column header with its sort link.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: &'static str,
    pub href: String,
    /// Arrow shown when the table is sorted by this column.
    pub indicator: &'static str,
}

/// Column headers for a page at `base` (path without query string).
///
/// Clicking the active column flips its direction; any other column starts
/// ascending. The search term is carried along.
#[must_use]
pub fn headers(columns: &[Column], base: &str, query: &TableQuery) -> Vec<HeaderView> {
    columns
        .iter()
        .map(|column| {
            let active = query.sort.as_deref() == Some(column.key);
            let dir = if active { query.dir.flipped() } else { SortDir::Asc };
            let indicator = match (active, query.dir) {
                (false, _) => "",
                (true, SortDir::Asc) => "\u{2191}",
                (true, SortDir::Desc) => "\u{2193}",
            };
            HeaderView {
                label: column.label,
                href: query_href(base, &query.q, Some((column.key, dir))),
                indicator,
            }
        })
        .collect()
}

/// `base?q=...&sort=...&dir=...`, leaving out empty parameters.
#[must_use]
pub fn query_href(base: &str, q: &str, sort: Option<(&str, SortDir)>) -> String {
    let mut params = url::form_urlencoded::Serializer::new(String::new());
    if !q.trim().is_empty() {
        params.append_pair("q", q.trim());
    }
    if let Some((key, dir)) = sort {
        params.append_pair("sort", key);
        params.append_pair("dir", dir.as_str());
    }
    let params = params.finish();
    if params.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{params}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![Column::new("label", "Label"), Column::new("createdAt", "Date")]
    }

    #[test]
    fn test_headers_link_and_flip() {
        let query = TableQuery {
            q: "summer sale".to_string(),
            sort: Some("label".to_string()),
            dir: SortDir::Asc,
        };
        let headers = headers(&columns(), "/s/billboards", &query);
        let label = headers.first();
        assert_eq!(
            label.map(|h| h.href.as_str()),
            Some("/s/billboards?q=summer+sale&sort=label&dir=desc")
        );
        assert_eq!(label.map(|h| h.indicator), Some("\u{2191}"));
        assert_eq!(
            headers.get(1).map(|h| h.href.as_str()),
            Some("/s/billboards?q=summer+sale&sort=createdAt&dir=asc")
        );
        assert_eq!(headers.get(1).map(|h| h.indicator), Some(""));
    }

    #[test]
    fn test_query_sort_pairs_key_with_dir() {
        let query = TableQuery {
            sort: Some("price".to_string()),
            dir: SortDir::Desc,
            ..TableQuery::default()
        };
        assert_eq!(query.sort(), Some(("price", SortDir::Desc)));
        assert_eq!(TableQuery::default().sort(), None);
    }

    #[test]
    fn test_query_href_without_params() {
        assert_eq!(query_href("/s/sizes", "  ", None), "/s/sizes");
    }
}
