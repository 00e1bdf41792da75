//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Transitions are one-directional: a pending order may be validated or
/// rejected, and neither terminal state can be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, awaiting review.
    Pending,
    /// Order validated by an administrator.
    Validated,
    /// Order rejected (with a reason) or soft-deleted.
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order is awaiting review.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the order counts toward sales objectives.
    #[must_use]
    pub const fn is_validated(&self) -> bool {
        matches!(self, Self::Validated)
    }

    /// Returns true if the order has been reviewed one way or the other.
    #[must_use]
    pub const fn is_reviewed(&self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Validated => write!(f, "validated"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}
