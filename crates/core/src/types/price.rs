//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A product price in US dollars.
///
/// Stored as a `Decimal` so sums over order items never pick up float error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with a dollar sign, thousands separators and two
    /// decimal places (e.g. `$1,234.50`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        format!("{sign}${}.{fraction}", group_thousands(whole))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

/// Insert a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::new(Decimal::new(12, 0)).display(), "$12.00");
        assert_eq!(Price::new(Decimal::new(1999, 2)).display(), "$19.99");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new(Decimal::new(123_456_750, 2)).display(), "$1,234,567.50");
        assert_eq!(Price::new(Decimal::new(100_000, 2)).display(), "$1,000.00");
        assert_eq!(Price::new(Decimal::new(99_999, 2)).display(), "$999.99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::new(Decimal::new(1005, 3)).display(), "$1.01");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Decimal::new(150, 2), Decimal::new(250, 2)]
            .into_iter()
            .map(Price::new)
            .sum();
        assert_eq!(total.display(), "$4.00");
    }
}
