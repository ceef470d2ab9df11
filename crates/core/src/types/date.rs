//! Display formatting for timestamps shown in tables.

use chrono::{DateTime, Datelike, Utc};

/// Format a creation timestamp as `MMMM do, yyyy` (e.g. "October 19th, 2026").
#[must_use]
pub fn format_created_at(at: &DateTime<Utc>) -> String {
    let day = at.day();
    format!(
        "{} {day}{}, {}",
        at.format("%B"),
        ordinal_suffix(day),
        at.year()
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
