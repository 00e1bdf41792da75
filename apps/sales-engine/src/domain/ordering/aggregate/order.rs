//! Order Aggregate Root
//!
//! The Order aggregate owns its lines and carries the pricing aggregates
//! derived from them. Status transitions are one-directional; terminal
//! states are never reopened.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::services::pricing::{self, OrderTotals};
use crate::domain::ordering::value_objects::{OrderNumber, OrderStatus};
use crate::domain::shared::{ClientId, LineId, OrderId, PromotionId, Timestamp, UserId};

use super::OrderLine;

/// Order Aggregate Root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: OrderNumber,
    sales_rep: UserId,
    client: ClientId,
    status: OrderStatus,
    created_at: Timestamp,
    validated_at: Option<Timestamp>,
    rejection_reason: Option<String>,
    promotion: Option<PromotionId>,
    totals: OrderTotals,
    admin_modified: bool,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Create a new pending order with priced lines.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the order has no lines.
    pub fn create(
        number: OrderNumber,
        sales_rep: UserId,
        client: ClientId,
        promotion: Option<PromotionId>,
        lines: Vec<OrderLine>,
    ) -> Result<Self, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::Validation {
                message: "An order requires at least one line".to_string(),
            });
        }

        let totals = pricing::order_totals(&lines);

        Ok(Self {
            id: OrderId::generate(),
            number,
            sales_rep,
            client,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
            validated_at: None,
            rejection_reason: None,
            promotion,
            totals,
            admin_modified: false,
            lines,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order id.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the order number.
    #[must_use]
    pub const fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Get the owning sales rep.
    #[must_use]
    pub const fn sales_rep(&self) -> &UserId {
        &self.sales_rep
    }

    /// Get the client.
    #[must_use]
    pub const fn client(&self) -> &ClientId {
        &self.client
    }

    /// Get the status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the validation timestamp, if validated.
    #[must_use]
    pub const fn validated_at(&self) -> Option<Timestamp> {
        self.validated_at
    }

    /// Get the rejection reason, if rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Get the applied promotion, if any.
    #[must_use]
    pub const fn promotion(&self) -> Option<&PromotionId> {
        self.promotion.as_ref()
    }

    /// Get the pricing aggregates.
    #[must_use]
    pub const fn totals(&self) -> OrderTotals {
        self.totals
    }

    /// Whether an administrator has modified the order after creation.
    #[must_use]
    pub const fn admin_modified(&self) -> bool {
        self.admin_modified
    }

    /// Get the order lines.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Find a line by id.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Replace the assigned number after an insert conflict.
    pub fn renumber(&mut self, number: OrderNumber) {
        self.number = number;
    }

    /// Mark the order as validated, stamping the validation date.
    pub fn validate(&mut self) {
        self.status = OrderStatus::Validated;
        self.validated_at = Some(Timestamp::now());
    }

    /// Mark the order as rejected with a reason.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.status = OrderStatus::Rejected;
        self.rejection_reason = Some(reason.into());
    }

    /// Apply an admin recompute: fresh lines read back from the store and
    /// the aggregates derived from them. Flags the order as admin-modified.
    pub fn apply_recompute(&mut self, lines: Vec<OrderLine>, totals: OrderTotals) {
        self.lines = lines;
        self.totals = totals;
        self.admin_modified = true;
    }

    /// Replace the stored lines without touching totals or flags.
    ///
    /// Line-level persistence only; the order-level recompute happens
    /// strictly after all line writes, from state read back from the store.
    pub fn replace_lines(&mut self, lines: Vec<OrderLine>) {
        self.lines = lines;
    }
}
