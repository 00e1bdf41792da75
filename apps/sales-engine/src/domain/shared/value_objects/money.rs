//! Money value object for currency amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

/// A monetary amount in the shop currency.
///
/// Represented as a Decimal for precise commercial calculations.
/// Always uses 2 decimal places for display (internal precision is higher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from minor units (cents).
    #[must_use]
    pub fn from_minor(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Get the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to 2 decimal places.
    #[must_use]
    pub fn round(&self) -> Self {
        Self(self.0.round_dp(2))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_new_and_display() {
        let m = Money::new(dec!(150.50));
        assert_eq!(format!("{m}"), "150.50");
    }

    #[test]
    fn money_from_minor() {
        let m = Money::from_minor(15050);
        assert_eq!(m.amount(), dec!(150.50));
    }

    #[test]
    fn money_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn money_positive_negative() {
        let pos = Money::new(dec!(100));
        let neg = Money::new(dec!(-50));

        assert!(pos.is_positive());
        assert!(!pos.is_negative());

        assert!(!neg.is_positive());
        assert!(neg.is_negative());
    }

    #[test]
    fn money_abs() {
        let neg = Money::new(dec!(-100));
        assert_eq!(neg.abs(), Money::new(dec!(100)));
    }

    #[test]
    fn money_round() {
        let m = Money::new(dec!(150.555));
        assert_eq!(m.round().amount(), dec!(150.56));
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::new(dec!(100));
        let b = Money::new(dec!(50));

        assert_eq!((a + b).amount(), dec!(150));
        assert_eq!((a - b).amount(), dec!(50));
        assert_eq!((a * dec!(2)).amount(), dec!(200));
        assert_eq!((a / dec!(4)).amount(), dec!(25));
    }

    #[test]
    fn money_sum() {
        let total: Money = [dec!(10.25), dec!(5.50), dec!(0.25)]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total.amount(), dec!(16.00));
    }

    #[test]
    fn money_ordering() {
        let a = Money::new(dec!(100));
        let b = Money::new(dec!(50));
        let c = Money::new(dec!(100));

        assert!(a > b);
        assert!(b < a);
        assert!(a == c);
    }

    #[test]
    fn money_serde_roundtrip() {
        let m = Money::new(dec!(150.50));
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn money_default_is_zero() {
        assert!(Money::default().is_zero());
    }
}
