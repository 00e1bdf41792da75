//! Human-readable order number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every order number.
const PREFIX: &str = "CMD";

/// A unique, human-readable order number.
///
/// Format: `CMD-<year>-<5-digit sequence>` (e.g. `CMD-2025-00042`). The
/// sequence widens past five digits once the yearly counter outgrows it, and
/// the collision fallback embeds a raw millisecond timestamp in its place.
/// Global uniqueness is enforced by the store, not by the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Create a number from a raw string (e.g. when loading stored data).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Format a number from a year and a sequence value.
    #[must_use]
    pub fn from_sequence(year: i32, sequence: u64) -> Self {
        Self(format!("{PREFIX}-{year}-{sequence:05}"))
    }

    /// Fallback number embedding a millisecond timestamp.
    ///
    /// Sacrifices the zero-padded aesthetic but cannot collide with any
    /// sequence-formatted number of the same year.
    #[must_use]
    pub fn fallback(year: i32, unix_millis: i64) -> Self {
        Self(format!("{PREFIX}-{year}-{unix_millis}"))
    }

    /// Prefix matching every number of the given year.
    #[must_use]
    pub fn year_prefix(year: i32) -> String {
        format!("{PREFIX}-{year}-")
    }

    /// Extract the sequence value if this number belongs to `year`.
    ///
    /// Returns `None` for numbers of other years or malformed values.
    #[must_use]
    pub fn sequence_for_year(&self, year: i32) -> Option<u64> {
        self.0
            .strip_prefix(&Self::year_prefix(year))
            .and_then(|seq| seq.parse().ok())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sequence_zero_pads() {
        let number = OrderNumber::from_sequence(2025, 42);
        assert_eq!(number.as_str(), "CMD-2025-00042");
    }

    #[test]
    fn from_sequence_widens_past_five_digits() {
        let number = OrderNumber::from_sequence(2025, 123_456);
        assert_eq!(number.as_str(), "CMD-2025-123456");
    }

    #[test]
    fn fallback_embeds_timestamp() {
        let number = OrderNumber::fallback(2025, 1_742_380_800_123);
        assert_eq!(number.as_str(), "CMD-2025-1742380800123");
    }

    #[test]
    fn sequence_for_year_parses() {
        let number = OrderNumber::from_sequence(2025, 42);
        assert_eq!(number.sequence_for_year(2025), Some(42));
    }

    #[test]
    fn sequence_for_other_year_is_none() {
        let number = OrderNumber::from_sequence(2025, 42);
        assert_eq!(number.sequence_for_year(2024), None);
    }

    #[test]
    fn sequence_for_malformed_value_is_none() {
        let number = OrderNumber::new("CMD-2025-abc");
        assert_eq!(number.sequence_for_year(2025), None);
    }

    #[test]
    fn year_prefix_format() {
        assert_eq!(OrderNumber::year_prefix(2025), "CMD-2025-");
    }

    #[test]
    fn serde_roundtrip() {
        let number = OrderNumber::from_sequence(2025, 7);
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"CMD-2025-00007\"");
        let parsed: OrderNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, number);
    }
}
