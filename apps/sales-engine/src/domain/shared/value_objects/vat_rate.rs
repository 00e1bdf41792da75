//! VAT rate value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::shared::DomainError;
use crate::domain::shared::value_objects::Money;

/// A value-added tax rate, expressed as a percentage (e.g. `19.00` for 19%).
///
/// Stored on each order line at order time so later catalog changes do not
/// affect existing orders. Order-level rates are the weighted average of the
/// line rates, derived from summed amounts rather than averaged percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatRate(Decimal);

impl VatRate {
    /// Create a new rate from a percentage value.
    #[must_use]
    pub const fn new(percent: Decimal) -> Self {
        Self(percent)
    }

    /// Zero rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the percentage value.
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Tax amount due on a net amount, rounded to 2 decimal places.
    #[must_use]
    pub fn vat_on(&self, net: Money) -> Money {
        (net * (self.0 / Decimal::ONE_HUNDRED)).round()
    }

    /// Validate the rate for use on an order line.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is negative or above 100%.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0 < Decimal::ZERO || self.0 > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidValue {
                field: "vat_rate".to_string(),
                message: format!("VAT rate must be between 0 and 100, got {}", self.0),
            });
        }
        Ok(())
    }
}

impl Default for VatRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl PartialOrd for VatRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VatRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<Decimal> for VatRate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<VatRate> for Decimal {
    fn from(value: VatRate) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn vat_rate_display() {
        let rate = VatRate::new(dec!(19));
        assert_eq!(format!("{rate}"), "19.00%");
    }

    #[test]
    fn vat_on_rounds_to_cents() {
        let rate = VatRate::new(dec!(19));
        let net = Money::new(dec!(10.05));
        // 10.05 * 0.19 = 1.9095 -> 1.91
        assert_eq!(rate.vat_on(net).amount(), dec!(1.91));
    }

    #[test]
    fn vat_on_zero_rate() {
        assert_eq!(VatRate::ZERO.vat_on(Money::new(dec!(100))), Money::ZERO);
    }

    #[test]
    fn validate_rejects_negative() {
        assert!(VatRate::new(dec!(-1)).validate().is_err());
    }

    #[test]
    fn validate_rejects_above_hundred() {
        assert!(VatRate::new(dec!(101)).validate().is_err());
    }

    #[test]
    fn validate_accepts_bounds() {
        assert!(VatRate::ZERO.validate().is_ok());
        assert!(VatRate::new(dec!(100)).validate().is_ok());
    }

    #[test]
    fn vat_rate_serde_roundtrip() {
        let rate = VatRate::new(dec!(7.5));
        let json = serde_json::to_string(&rate).unwrap();
        let parsed: VatRate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rate);
    }
}
