//! Review Order Use Case
//!
//! Admin review transitions: validation, rejection, and the two removal
//! flavors. The soft delete keeps the record, parks it in the rejected state
//! with a system reason, and leaves an audit entry for the owning rep; the
//! hard delete removes the order and everything it owns.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::OrderDto;
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::history::HistoryEntry;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::shared::{OrderId, UserId};

/// Reason recorded when an admin removes an order without giving one.
const SOFT_DELETE_REASON: &str = "Order removed by the administration";

/// Use case for the admin review transitions on orders.
pub struct ReviewOrderUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> ReviewOrderUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new use case.
    pub const fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    async fn load(&self, order_id: &OrderId) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                entity: "order".to_string(),
                id: order_id.to_string(),
            })
    }

    /// Validate an order, stamping the validation date.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    pub async fn validate(&self, order_id: &str) -> Result<OrderDto, OrderError> {
        let order_id = OrderId::new(order_id);
        let mut order = self.load(&order_id).await?;

        order.validate();
        self.orders.update(&order).await?;

        info!(order = %order_id, number = %order.number(), "order validated");
        Ok(OrderDto::from_order(&order))
    }

    /// Reject an order with a reason shown to the owning rep.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] for a blank reason and
    /// [`OrderError::NotFound`] if the order does not exist.
    pub async fn reject(&self, order_id: &str, reason: &str) -> Result<OrderDto, OrderError> {
        if reason.trim().is_empty() {
            return Err(OrderError::Validation {
                message: "a rejection reason is required".to_string(),
            });
        }

        let order_id = OrderId::new(order_id);
        let mut order = self.load(&order_id).await?;

        order.reject(reason.trim());
        self.orders.update(&order).await?;

        info!(order = %order_id, "order rejected");
        Ok(OrderDto::from_order(&order))
    }

    /// Soft-delete an order: mark it rejected with a system reason and leave
    /// an audit entry attributed to the acting admin.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    pub async fn soft_delete(
        &self,
        order_id: &str,
        acting_admin: &str,
    ) -> Result<OrderDto, OrderError> {
        let order_id = OrderId::new(order_id);
        let mut order = self.load(&order_id).await?;

        let previous = order.status();
        order.reject(SOFT_DELETE_REASON);
        self.orders.update(&order).await?;
        self.orders
            .append_history(&HistoryEntry::status_change(
                order_id.clone(),
                previous,
                order.status(),
                UserId::new(acting_admin),
            ))
            .await?;

        info!(order = %order_id, by = acting_admin, "order soft-deleted");
        Ok(OrderDto::from_order(&order))
    }

    /// Hard-delete an order, cascading to its lines and history. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    pub async fn hard_delete(&self, order_id: &str) -> Result<(), OrderError> {
        let order_id = OrderId::new(order_id);
        self.orders.delete(&order_id).await?;

        info!(order = %order_id, "order hard-deleted");
        Ok(())
    }
}
