//! Dollar amounts.
//!
//! The catalog is priced in US dollars only, so `Price` is a thin wrapper
//! over a [`Decimal`] that knows how to multiply, sum and print itself.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;

/// A US dollar amount, e.g. `$12.99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Amount in dollars.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Rounded to cents with a leading `$`.
    ///
    /// Returned as a `String` so callers can pad it in table output.
    #[must_use]
    pub fn display(self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::usd(Decimal::new(1299, 2)).display(), "$12.99");
        assert_eq!(Price::usd(Decimal::new(399, 1)).display(), "$39.90");
        assert_eq!(Price::usd(Decimal::from(5)).display(), "$5.00");
        assert_eq!(format!("{:>8}", Price::usd(Decimal::new(875, 2))), "   $8.75");
    }

    #[test]
    fn test_times() {
        let unit = Price::usd(Decimal::new(1299, 2));
        assert_eq!(unit.times(5).amount(), Decimal::new(6495, 2));
        assert_eq!(unit.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Decimal::new(875, 2), Decimal::new(1520, 2)]
            .into_iter()
            .map(Price::usd)
            .sum();
        assert_eq!(total, Price::usd(Decimal::new(2395, 2)));
        assert_eq!(std::iter::empty::<Price>().sum::<Price>(), Price::ZERO);
    }
}
