//! Order change history.
//!
//! Every admin-driven change to an order appends one immutable entry. The
//! only mutation ever applied is flipping the rep-facing `seen` flag; entries
//! are removed solely by cascade when an order is hard-deleted.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::{EntryId, OrderId, Quantity, Timestamp, UserId};

/// A single recorded field change on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: EntryId,
    order: OrderId,
    field: String,
    old_value: String,
    new_value: String,
    modified_by: UserId,
    modified_at: Timestamp,
    seen_by_rep: bool,
}

impl HistoryEntry {
    /// Record a change, unseen by the rep.
    #[must_use]
    pub fn record(
        order: OrderId,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        modified_by: UserId,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            order,
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            modified_by,
            modified_at: Timestamp::now(),
            seen_by_rep: false,
        }
    }

    /// Record a quantity change on a named product line.
    #[must_use]
    pub fn quantity_change(
        order: OrderId,
        product_name: &str,
        old: Quantity,
        new: Quantity,
        modified_by: UserId,
    ) -> Self {
        Self::record(
            order,
            format!("quantity - {product_name}"),
            old.to_string(),
            new.to_string(),
            modified_by,
        )
    }

    /// Record a status change.
    #[must_use]
    pub fn status_change(
        order: OrderId,
        old: OrderStatus,
        new: OrderStatus,
        modified_by: UserId,
    ) -> Self {
        Self::record(
            order,
            "status",
            old.to_string(),
            new.to_string(),
            modified_by,
        )
    }

    /// Get the entry id.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Get the owning order id.
    #[must_use]
    pub const fn order(&self) -> &OrderId {
        &self.order
    }

    /// Get the changed field label.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the previous value.
    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Get the new value.
    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    /// Get the user who made the change.
    #[must_use]
    pub const fn modified_by(&self) -> &UserId {
        &self.modified_by
    }

    /// Get the change timestamp.
    #[must_use]
    pub const fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Whether the owning rep has seen this entry.
    #[must_use]
    pub const fn seen_by_rep(&self) -> bool {
        self.seen_by_rep
    }

    /// Flip the seen flag. Rep-initiated, never automatic.
    pub fn mark_seen(&mut self) {
        self.seen_by_rep = true;
    }
}
