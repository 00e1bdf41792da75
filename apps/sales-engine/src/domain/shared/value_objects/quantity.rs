//! Quantity value object for order lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::shared::DomainError;

/// Maximum quantity accepted on a single order line.
const MAX_QUANTITY: i64 = 100_000;

/// An order-line quantity.
///
/// Quantities are strictly positive whole units; a zero or negative request
/// is a validation error, never silently clamped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a quantity from a raw client-supplied value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or above the
    /// per-line maximum.
    pub fn try_new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "quantity must be a strictly positive integer".to_string(),
            });
        }
        if value > MAX_QUANTITY {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: format!("quantity exceeds maximum: {MAX_QUANTITY}"),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u32))
    }

    /// Get the raw unit count.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// Get the quantity as a Decimal, for pricing arithmetic.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.as_decimal()
    }
}

impl PartialEq<u32> for Quantity {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u32> for Quantity {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        Some(self.0.cmp(other))
    }
}
