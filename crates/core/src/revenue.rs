//! Monthly revenue series for the dashboard chart.

use rust_decimal::Decimal;
use serde::Serialize;

/// Short month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphPoint {
    pub name: &'static str,
    pub total: Decimal,
}

/// Fold `(month, revenue)` pairs into twelve zero-filled buckets.
///
/// `month` is 1-based (1 = January), as returned by
/// `EXTRACT(MONTH FROM ...)`. Pairs with an out-of-range month are ignored;
/// repeated months are summed.
#[must_use]
pub fn monthly_series<I>(totals: I) -> Vec<GraphPoint>
where
    I: IntoIterator<Item = (u32, Decimal)>,
{
    let mut buckets = [Decimal::ZERO; 12];
    for (month, total) in totals {
        let index = month.checked_sub(1).and_then(|m| usize::try_from(m).ok());
        if let Some(bucket) = index.and_then(|i| buckets.get_mut(i)) {
            *bucket += total;
        }
    }

    MONTH_NAMES
        .into_iter()
        .zip(buckets)
        .map(|(name, total)| GraphPoint { name, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_twelve_zero_buckets() {
        let series = monthly_series(Vec::new());
        assert_eq!(series.len(), 12);
        assert!(series.iter().all(|p| p.total.is_zero()));
        assert_eq!(series.first().map(|p| p.name), Some("Jan"));
        assert_eq!(series.last().map(|p| p.name), Some("Dec"));
    }

    #[test]
    fn test_months_are_bucketed_and_summed() {
        let series = monthly_series([
            (3, Decimal::new(1000, 2)),
            (3, Decimal::new(550, 2)),
            (12, Decimal::new(1, 0)),
        ]);
        assert_eq!(series.get(2).map(|p| p.total), Some(Decimal::new(1550, 2)));
        assert_eq!(series.get(11).map(|p| p.total), Some(Decimal::ONE));
        assert_eq!(series.first().map(|p| p.total), Some(Decimal::ZERO));
    }

    #[test]
    fn test_out_of_range_months_are_ignored() {
        let series = monthly_series([(0, Decimal::ONE), (13, Decimal::ONE)]);
        assert!(series.iter().all(|p| p.total.is_zero()));
    }
}
